//! HTTP adapter mapping for domain errors.
//!
//! Domain failures leave handlers as [`Error`] values; this module turns them
//! into JSON bodies with a matching status code. Internal errors (storage
//! failures included) are logged with their original message and reach
//! clients only as a generic payload.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{
    Error, ErrorCode, FavoriteValidationError, LoginValidationError, TRACE_ID_HEADER,
    UserValidationError,
};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned to clients in place of internal error details.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(
        message = error.message(),
        trace_id = error.trace_id().unwrap_or_default(),
        "internal error redacted from response"
    );
    let redacted = Error::internal(INTERNAL_ERROR_MESSAGE);
    if let Some(id) = error.trace_id() {
        return redacted.with_trace_id(id.to_owned());
    }
    redacted
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}

impl From<FavoriteValidationError> for Error {
    fn from(err: FavoriteValidationError) -> Self {
        match err {
            FavoriteValidationError::EmptyCountryCode => Error::invalid_request(err.to_string())
                .with_details(json!({
                    "field": "countryCode",
                    "code": "missing_field",
                })),
        }
    }
}

impl From<LoginValidationError> for Error {
    fn from(err: LoginValidationError) -> Self {
        let (field, code) = match &err {
            LoginValidationError::Username(UserValidationError::UsernameTooLong { .. }) => {
                ("username", "too_long")
            }
            LoginValidationError::Username(_) => ("username", "empty_field"),
            LoginValidationError::EmptyPassword => ("password", "empty_field"),
        };
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "code": code,
        }))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
