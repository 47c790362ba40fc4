//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies that fail to decode surface as `invalid_request` errors in
//! the standard error schema rather than Actix's plain-text default.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MalformedBody,
    UnsupportedContentType,
    PayloadTooLarge,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::UnsupportedContentType => "unsupported_content_type",
            ErrorCode::PayloadTooLarge => "payload_too_large",
        }
    }
}

fn body_error(code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

pub(crate) fn json_payload_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => body_error(
            ErrorCode::UnsupportedContentType,
            "request body must be application/json",
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            body_error(ErrorCode::PayloadTooLarge, "request body is too large")
        }
        other => body_error(
            ErrorCode::MalformedBody,
            format!("request body is not valid JSON: {other}"),
        ),
    }
}

/// JSON extractor configuration rendering decode failures as [`Error`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use explorer_backend::inbound::http::validation::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        debug!(error = %err, path = req.path(), "rejected request body");
        json_payload_error(&err).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    #[rstest]
    fn content_type_errors_are_named() {
        let err = json_payload_error(&JsonPayloadError::ContentType);
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "code": "unsupported_content_type" }))
        );
    }

    #[rstest]
    fn overflow_errors_are_named() {
        let err = json_payload_error(&JsonPayloadError::Overflow { limit: 16 });
        assert_eq!(err.details(), Some(&json!({ "code": "payload_too_large" })));
    }

    #[rstest]
    fn decode_errors_are_malformed_body() {
        let source = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated JSON");
        let err = json_payload_error(&JsonPayloadError::Deserialize(source));
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "code": "malformed_body" })));
    }
}
