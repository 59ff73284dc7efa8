//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::domain::entities::AnimalKind;
use crate::state::AppState;

/// Template for the home page.
///
/// Renders `templates/index.html` with one button per animal and a free-text
/// box. Images are fetched client-side from `POST /api/animal`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub animals: Vec<&'static str>,
    pub selector: &'static str,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        animals: AnimalKind::ALL.iter().map(AnimalKind::as_str).collect(),
        selector: state.selector.name(),
    }
}
