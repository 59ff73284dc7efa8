//! Handlers for the animal endpoints.

use axum::{Json, extract::State};
use tracing::{info, warn};
use validator::Validate;

use crate::api::dto::animal::{AnimalListResponse, AnimalRequest, AnimalResponse};
use crate::domain::entities::AnimalKind;
use crate::domain::errors::{FetchError, fallback_image};
use crate::error::AppError;
use crate::infrastructure::selector::select_with_fallback;
use crate::state::AppState;

/// Fetches one animal image.
///
/// # Endpoint
///
/// `POST /api/animal`
///
/// # Request Body
///
/// ```json
/// { "animal": "duck" }
/// ```
///
/// or a free-text query routed through the configured selector:
///
/// ```json
/// { "query": "show me a cute cat" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "imageUrl": "https://random-d.uk/api/v2/12.jpg",
///   "animal": "duck",
///   "message": "Here's a duck!"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: no supported animal in the request
/// - **429 Too Many Requests**: upstream API rate limited us (with `Retry-After`)
///
/// Any other upstream failure still answers 200 with a static image from the
/// backup collection.
pub async fn animal_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnimalRequest>,
) -> Result<Json<AnimalResponse>, AppError> {
    payload.validate()?;

    let query = payload
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let kind = resolve_animal(&state, payload.animal.as_deref(), query)
        .await
        .ok_or_else(|| AppError::bad_request(unknown_animal_message()))?;

    match state.animal_service.fetch(kind).await {
        Ok(image) => {
            let message = query
                .map(str::to_string)
                .unwrap_or_else(|| format!("Here's a {kind}!"));
            Ok(Json(AnimalResponse::new(image.url, kind, message)))
        }
        Err(FetchError::RateLimited { retry_after, .. }) => {
            Err(AppError::rate_limited(retry_after.as_deref()))
        }
        Err(e) => {
            warn!(animal = %kind, error = %e, "Serving backup image");
            Ok(Json(AnimalResponse::new(
                fallback_image(kind),
                kind,
                format!("Here's a {kind} (from our backup collection)!"),
            )))
        }
    }
}

/// Lists the supported animals.
///
/// # Endpoint
///
/// `GET /api/animals`
pub async fn animal_list_handler() -> Json<AnimalListResponse> {
    Json(AnimalListResponse {
        animals: AnimalKind::ALL.to_vec(),
    })
}

/// An explicit `animal` wins; otherwise the query goes through the selector.
async fn resolve_animal(
    state: &AppState,
    animal: Option<&str>,
    query: Option<&str>,
) -> Option<AnimalKind> {
    if let Some(name) = animal.filter(|a| !a.trim().is_empty()) {
        return name.parse().ok();
    }

    let query = query?;
    let choice =
        select_with_fallback(state.selector.as_ref(), query, &state.tools.animal_specs()).await;

    info!(
        selector = state.selector.name(),
        tool = ?choice.tool,
        "Routed query"
    );

    choice.tool?.parse().ok()
}

fn unknown_animal_message() -> String {
    let supported: Vec<&str> = AnimalKind::ALL.iter().map(AnimalKind::as_str).collect();
    format!("Unknown animal. Supported: {}", supported.join(", "))
}
