mod common;

use actix_web::test;
use serde_json::{json, Value};
use serial_test::serial;

use common::TestApp;

#[actix_web::test]
#[serial]
async fn health_check_reports_database_status() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert!(body["status"].is_string());
    assert_eq!(body["services"]["database"]["status"], "ok");
    assert!(body["version"].is_string());
}

#[actix_web::test]
#[serial]
async fn ai_generate_without_a_key_degrades_in_the_envelope() {
    std::env::remove_var("OPENAI_API_KEY");

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/generate")
        .set_json(json!({"destination": "Tokyo", "days": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["msg"], "AI planner unavailable");
}

#[actix_web::test]
#[serial]
async fn budget_analysis_without_a_key_degrades_in_the_envelope() {
    std::env::remove_var("OPENAI_API_KEY");

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/budget/analyze")
        .set_json(json!({"totalBudget": 1000, "expenses": []}))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    assert_eq!(body["code"], 0);
    assert_eq!(body["msg"], "AI budget advisor unavailable");
}

#[actix_web::test]
#[serial]
async fn nearby_places_without_a_key_return_a_bare_empty_array() {
    std::env::remove_var("AMAP_KEY");

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/map/nearby?lng=139.7&lat=35.7&type=restaurant")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // This endpoint returns a plain array, not the envelope.
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn unknown_routes_are_not_found() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}
