mod common;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use petting_zootopia::api::handlers::health_handler;
use serde_json::json;
use wiremock::MockServer;

async fn health_app(upstream: &MockServer) -> TestServer {
    let app = Router::new()
        .route("/api/health", get(health_handler))
        .with_state(common::create_test_state(upstream));

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_all_healthy() {
    let upstream = MockServer::start().await;
    common::mount_json(&upstream, common::DUCK_PATH, 200, json!({"url": "https://d/1.jpg"})).await;
    common::mount_json(&upstream, common::DOG_PATH, 200, json!({"url": "https://g/1.jpg"})).await;
    common::mount_json(&upstream, common::CAT_PATH, 200, json!([{"url": "https://c/1.jpg"}])).await;

    let server = health_app(&upstream).await;

    let response = server.get("/api/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["healthyApis"], 3);
    assert_eq!(json["totalApis"], 3);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let upstream = MockServer::start().await;
    common::mount_json(&upstream, common::DUCK_PATH, 200, json!({"url": "https://d/1.jpg"})).await;
    common::mount_status(&upstream, common::DOG_PATH, 500).await;
    common::mount_json(&upstream, common::CAT_PATH, 200, json!([{"url": "https://c/1.jpg"}])).await;

    let server = health_app(&upstream).await;

    let response = server.get("/api/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");

    let dog = json["apis"]
        .as_array()
        .unwrap()
        .iter()
        .find(|api| api["api"] == "dog")
        .unwrap();
    assert_eq!(dog["healthy"], false);
    assert_eq!(dog["error"], "Status 500");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let upstream = MockServer::start().await;

    let server = health_app(&upstream).await;

    let response = server.get("/api/health").await;

    // Unmatched wiremock routes answer 404, so every API is down.
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "unhealthy");
    assert!(json.get("checkedAt").is_some());
    assert_eq!(json["apis"].as_array().unwrap().len(), 3);
    assert!(json["apis"][0].get("latencyMs").is_some());
}
