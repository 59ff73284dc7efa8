//! Top-level router configuration combining API, JSON-RPC and web routes.
//!
//! # Route Structure
//!
//! - `POST /api/animal`        - Animal image (rate limited)
//! - `GET  /api/tools`         - Tool list (rate limited)
//! - `POST /api/tools/{name}`  - Tool call (rate limited)
//! - `GET  /api/health`        - Upstream API health
//! - `GET  /api/animals`       - Supported animals
//! - `POST /mcp`               - JSON-RPC tool endpoint (rate limited)
//! - `GET  /`, `GET /about`    - Web pages
//! - `/assets/*`               - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::mcp_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::post;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Rate limits and the assets directory come from `state.config`. `/api/*`
/// and `/mcp` keep separate buckets. When `behind_proxy` is set, rate
/// limiting reads the client IP from `X-Forwarded-For` / `X-Real-IP` headers
/// instead of the peer socket address; enable it only when the service runs
/// behind a trusted reverse proxy.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let config = state.config.clone();
    let limited = |router: Router<AppState>| {
        rate_limit::apply(router, config.rate_limit_per_minute, config.behind_proxy)
    };

    let api_router =
        limited(api::routes::limited_routes()).merge(api::routes::public_routes());
    let mcp_router = limited(Router::new().route("/mcp", post(mcp_handler)));

    let router = Router::new()
        .nest("/api", api_router)
        .merge(mcp_router)
        .merge(web::routes::public_routes())
        .nest_service("/assets", ServeDir::new(&config.assets_dir))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
