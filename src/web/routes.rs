//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{about_handler, index_handler};
use axum::{Router, routing::get};

/// Public HTML pages.
///
/// # Endpoints
///
/// - `GET /` - Home page with the animal picker
/// - `GET /about` - About page
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/about", get(about_handler))
}
