//! About page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub version: &'static str,
}

/// Renders the about page.
///
/// # Endpoint
///
/// `GET /about`
pub async fn about_handler() -> impl IntoResponse {
    AboutTemplate {
        version: env!("CARGO_PKG_VERSION"),
    }
}
