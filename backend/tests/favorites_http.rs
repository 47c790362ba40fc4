//! End-to-end HTTP tests for the favorites API over the in-memory store.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web};
use explorer_backend::inbound::http::health::HealthState;
use explorer_backend::server::{AppDependencies, AppPorts, SessionSettings, build_app};
use rstest::rstest;
use serde_json::{Value, json};

fn deps(ports: &AppPorts) -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: ports.http_state.clone(),
        session: SessionSettings::ephemeral(),
    }
}

async fn provisioned_ports() -> AppPorts {
    let ports = AppPorts::in_memory();
    ports
        .accounts
        .provision_fixture_user()
        .await
        .expect("provision fixture user");
    ports
}

fn login_request() -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": "admin", "password": "password"}))
}

fn toggle_request(cookie: &Cookie<'static>, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/favorites/toggle")
        .cookie(cookie.clone())
        .set_json(body)
}

fn codes(body: &Value) -> Vec<&str> {
    body["favoriteCountries"]
        .as_array()
        .expect("favoriteCountries")
        .iter()
        .filter_map(|favorite| favorite["code"].as_str())
        .collect()
}

macro_rules! session_cookie {
    ($app:expr) => {{
        let res = test::call_service(&$app, login_request().to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }};
}

#[rstest]
#[actix_rt::test]
async fn list_sends_private_no_cache_header() {
    let ports = provisioned_ports().await;
    let app = test::init_service(build_app(deps(&ports))).await;
    let cookie = session_cookie!(app);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/favorites")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("Cache-Control")
            .and_then(|value| value.to_str().ok()),
        Some("private, no-cache")
    );
}

#[rstest]
#[actix_rt::test]
async fn login_provisions_the_user_when_startup_did_not() {
    let ports = AppPorts::in_memory();
    let app = test::init_service(build_app(deps(&ports))).await;
    let cookie = session_cookie!(app);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/favorites")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert!(codes(&body).is_empty());
}

#[rstest]
#[actix_rt::test]
async fn toggle_response_carries_the_full_list_with_display_fields() {
    let ports = provisioned_ports().await;
    let app = test::init_service(build_app(deps(&ports))).await;
    let cookie = session_cookie!(app);

    for (code, name) in [("DEU", "Germany"), ("FRA", "France")] {
        let res = test::call_service(
            &app,
            toggle_request(
                &cookie,
                json!({
                    "countryCode": code,
                    "countryName": name,
                    "flagUrl": format!("https://flagcdn.com/{}.svg", code.to_lowercase()),
                }),
            )
            .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let body: Value = test::call_and_read_body_json(
        &app,
        toggle_request(&cookie, json!({"countryCode": "ITA"})).to_request(),
    )
    .await;

    assert_eq!(body["added"], true);
    assert_eq!(codes(&body), ["DEU", "FRA", "ITA"]);
    assert_eq!(body["favoriteCountries"][1]["name"], "France");
    assert_eq!(
        body["favoriteCountries"][1]["flag"],
        "https://flagcdn.com/fra.svg"
    );
    assert!(body["favoriteCountries"][2].get("name").is_none());
}

#[rstest]
#[case(json!({}))]
#[case(json!({"countryCode": null}))]
#[case(json!({"countryCode": ""}))]
#[actix_rt::test]
async fn missing_country_code_is_rejected_without_side_effects(#[case] body: Value) {
    let ports = provisioned_ports().await;
    let app = test::init_service(build_app(deps(&ports))).await;
    let cookie = session_cookie!(app);

    let res = test::call_service(&app, toggle_request(&cookie, body).to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(res).await;
    assert_eq!(error["message"], "Country code is required.");

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/favorites")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert!(codes(&listed).is_empty());
}

#[rstest]
#[actix_rt::test]
async fn codes_are_trimmed_but_case_sensitive() {
    let ports = provisioned_ports().await;
    let app = test::init_service(build_app(deps(&ports))).await;
    let cookie = session_cookie!(app);

    test::call_service(
        &app,
        toggle_request(&cookie, json!({"countryCode": " DEU "})).to_request(),
    )
    .await;
    let body: Value = test::call_and_read_body_json(
        &app,
        toggle_request(&cookie, json!({"countryCode": "deu"})).to_request(),
    )
    .await;

    assert_eq!(codes(&body), ["DEU", "deu"]);
}

#[rstest]
#[actix_rt::test]
async fn interleaved_toggles_never_duplicate_a_code() {
    let ports = provisioned_ports().await;
    let app = test::init_service(build_app(deps(&ports))).await;
    let cookie = session_cookie!(app);

    let requests = (0..7).map(|_| {
        test::call_service(
            &app,
            toggle_request(&cookie, json!({"countryCode": "NOR"})).to_request(),
        )
    });
    for res in futures_util::future::join_all(requests).await {
        assert_eq!(res.status(), StatusCode::OK);
    }

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/favorites")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(codes(&listed), ["NOR"], "odd number of toggles leaves one");
}
