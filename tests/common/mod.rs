#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use petting_zootopia::config::{ApiEndpoints, Config};
use petting_zootopia::domain::gateways::{HttpTransport, ToolSelector};
use petting_zootopia::infrastructure::http::ReqwestTransport;
use petting_zootopia::infrastructure::selector::KeywordSelector;
use petting_zootopia::state::AppState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DUCK_PATH: &str = "/duck";
pub const DOG_PATH: &str = "/dog";
pub const DOG_FALLBACK_PATH: &str = "/dog-fallback";
pub const CAT_PATH: &str = "/cat";

/// Configuration pointing every upstream API at `upstream`.
pub fn test_config(upstream: &MockServer) -> Config {
    let base = upstream.uri();

    Config {
        http_timeout: Duration::from_secs(2),
        health_timeout: Duration::from_secs(2),
        endpoints: ApiEndpoints {
            duck_url: format!("{base}{DUCK_PATH}"),
            dog_url: format!("{base}{DOG_PATH}"),
            dog_fallback_url: format!("{base}{DOG_FALLBACK_PATH}"),
            cat_url: format!("{base}{CAT_PATH}"),
        },
        ..Config::default()
    }
}

pub fn create_test_state(upstream: &MockServer) -> AppState {
    create_test_state_with_selector(upstream, Arc::new(KeywordSelector::new()))
}

pub fn create_test_state_with_selector(
    upstream: &MockServer,
    selector: Arc<dyn ToolSelector>,
) -> AppState {
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new().unwrap());
    AppState::new(transport, selector, test_config(upstream))
}

pub async fn mount_json(upstream: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(upstream)
        .await;
}

pub async fn mount_status(upstream: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(upstream)
        .await;
}
