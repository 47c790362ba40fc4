//! Tests for the login and logout handlers.

use super::*;
use crate::domain::ports::{FIXTURE_LOGIN_USER_ID, MockLoginService};
use crate::domain::{UserId, ports::LoginService};
use crate::inbound::http::test_utils::{state_with, test_session_middleware};
use crate::inbound::http::validation::json_config;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").service(login).service(logout))
}

fn login_request(username: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: username.into(),
            password: password.into(),
        })
        .to_request()
}

#[rstest]
#[case("   ", "password", "username")]
#[case("admin", "", "password")]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(state_with(None, None))).await;

    let response = actix_test::call_service(&app, login_request(username, password)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_with_unauthorised_status() {
    let app = actix_test::init_service(test_app(state_with(None, None))).await;

    let response = actix_test::call_service(&app, login_request("admin", "wrong")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], "invalid credentials");
    assert_eq!(value["code"], "unauthorized");
}

#[actix_web::test]
async fn login_sets_session_cookie() {
    let app = actix_test::init_service(test_app(state_with(None, None))).await;

    let response = actix_test::call_service(&app, login_request("admin", "password")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie");
    assert!(cookie.http_only().unwrap_or(true));
}

#[actix_web::test]
async fn login_delegates_to_the_login_port() {
    let mut login_port = MockLoginService::new();
    login_port
        .expect_authenticate()
        .withf(|creds| creds.username() == "ada" && creds.password() == "secret")
        .times(1)
        .return_once(|_| Ok(UserId::new(FIXTURE_LOGIN_USER_ID).expect("fixture id")));
    let login_port: Arc<dyn LoginService> = Arc::new(login_port);
    let state = HttpState::fixtures().with_login(login_port);
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(&app, login_request("ada", "secret")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn malformed_login_body_uses_error_schema() {
    let app = actix_test::init_service(test_app(state_with(None, None))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"username\":")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["code"], "malformed_body");
}

#[actix_web::test]
async fn logout_without_session_is_no_content() {
    let app = actix_test::init_service(test_app(state_with(None, None))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn logout_expires_the_session_cookie() {
    let app = actix_test::init_service(test_app(state_with(None, None))).await;
    let login_res = actix_test::call_service(&app, login_request("admin", "password")).await;
    let cookie = login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let removal = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie");
    assert_eq!(removal.value(), "");
}
