mod common;

use axum_test::TestServer;
use petting_zootopia::web;
use wiremock::MockServer;

async fn web_app() -> TestServer {
    let upstream = MockServer::start().await;
    let app = web::routes::public_routes().with_state(common::create_test_state(&upstream));

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_index_page() {
    let server = web_app().await;

    let response = server.get("/").await;

    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains(r#"data-animal="duck""#));
    assert!(html.contains(r#"data-animal="dog""#));
    assert!(html.contains(r#"data-animal="cat""#));
    assert!(html.contains("keyword routing"));
}

#[tokio::test]
async fn test_about_page() {
    let server = web_app().await;

    let response = server.get("/about").await;

    response.assert_status_ok();
    assert!(
        response
            .text()
            .contains(&format!("Version {}", env!("CARGO_PKG_VERSION")))
    );
}
