//! API route configuration.

use crate::api::handlers::{
    animal_handler, animal_list_handler, health_handler, tool_call_handler, tool_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Rate-limited API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /animal`        - Fetch one animal image
/// - `GET  /tools`         - List tools
/// - `POST /tools/{name}`  - Call a tool
pub fn limited_routes() -> Router<AppState> {
    Router::new()
        .route("/animal", post(animal_handler))
        .route("/tools", get(tool_list_handler))
        .route("/tools/{name}", post(tool_call_handler))
}

/// API routes served without rate limiting, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /health`   - Upstream API health
/// - `GET /animals`  - Supported animals
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/animals", get(animal_list_handler))
}
