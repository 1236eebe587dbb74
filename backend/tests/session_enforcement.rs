//! Session and validation behaviour of the public API surface.

#[allow(dead_code)]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use backend::domain::{SelectionPolicy, TRACE_ID_HEADER};
use support::{get_json, init_app, login_as};

#[rstest]
#[case("GET", "/api/v1/users/me", None)]
#[case("GET", "/api/v1/cards/next", None)]
#[case("POST", "/api/v1/cards/mark", Some(json!({ "vocabId": "A", "status": "known" })))]
#[case("POST", "/api/v1/cards/reset", Some(json!({ "vocabId": "A" })))]
#[case("GET", "/api/v1/stats", None)]
#[actix_web::test]
async fn core_endpoints_require_login(
    #[case] method: &str,
    #[case] uri: &str,
    #[case] body: Option<Value>,
) {
    let app = init_app(&["A"], SelectionPolicy::default()).await;
    let request = match (method, body) {
        ("POST", Some(body)) => test::TestRequest::post().uri(uri).set_json(body),
        _ => test::TestRequest::get().uri(uri),
    };

    let response = test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], trace_id);
}

#[actix_web::test]
async fn login_normalises_and_is_idempotent() {
    let app = init_app(&["A"], SelectionPolicy::default()).await;

    let first = login_as(&app, "  Ada ").await;
    let me_first = get_json(&app, &first, "/api/v1/users/me").await;
    let second = login_as(&app, "ADA").await;
    let me_second = get_json(&app, &second, "/api/v1/users/me").await;

    assert_eq!(me_first["username"], "ada");
    assert_eq!(me_first, me_second);
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = init_app(&["A"], SelectionPolicy::default()).await;
    let cookie = login_as(&app, "ada").await;

    let request = test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(cookie)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("removal cookie");

    let request = test::TestRequest::get()
        .uri("/api/v1/stats")
        .cookie(cleared)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(json!({ "vocabId": "missing", "status": "known" }), StatusCode::NOT_FOUND)]
#[case(json!({ "vocabId": "A", "status": "learned" }), StatusCode::BAD_REQUEST)]
#[case(json!({ "vocabId": " ", "status": "known" }), StatusCode::BAD_REQUEST)]
#[case(json!({ "status": "known" }), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn mark_reports_bad_input(#[case] body: Value, #[case] expected: StatusCode) {
    let app = init_app(&["A"], SelectionPolicy::default()).await;
    let cookie = login_as(&app, "ada").await;

    let request = test::TestRequest::post()
        .uri("/api/v1/cards/mark")
        .cookie(cookie)
        .set_json(body)
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
}
