use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;

use crate::routes;
use crate::state::app_state::AppState;

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::for_tests_without_db()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn create_trial_rejects_missing_fields_before_storage() {
    let app = test_app!();

    // No database is configured, so a 400 here proves the field check
    // happens first.
    let req = test::TestRequest::post()
        .uri("/create_trial")
        .set_json(json!({ "username1": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MISSING_FIELDS");
}

#[actix_web::test]
async fn create_trial_treats_empty_fields_as_missing() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/create_trial")
        .set_json(json!({ "username1": "alice", "username2": "bob", "description": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_trial_without_db_reports_unavailable() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/create_trial")
        .set_json(json!({
            "username1": "alice",
            "username2": "bob",
            "description": "The case of the missing teapot"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "DB_UNAVAILABLE");
}

#[actix_web::test]
async fn opponent_ready_unknown_trial_is_not_found() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/opponent_ready/no-such-trial/alice")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "TRIAL_NOT_FOUND");
}

#[actix_web::test]
async fn root_banner_is_served() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Mock Trial backend is up.");
}

#[actix_web::test]
async fn health_stays_up_without_db() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
}

#[actix_web::test]
async fn error_responses_carry_trace_id() {
    let app = test::init_service(
        App::new()
            .wrap(crate::middleware::RequestTrace)
            .app_data(web::Data::new(AppState::for_tests_without_db()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/create_trial")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let header = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id header")
        .to_str()
        .expect("header is ascii")
        .to_string();

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["trace_id"], header);
}
