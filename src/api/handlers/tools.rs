//! Handlers for the REST tool endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde_json::Value;

use crate::api::dto::tool::{ToolCallResponse, ToolListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the available tools.
///
/// # Endpoint
///
/// `GET /api/tools`
pub async fn tool_list_handler(State(state): State<AppState>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: state.tools.list(),
    })
}

/// Calls a tool by name.
///
/// # Endpoint
///
/// `POST /api/tools/{name}`
///
/// The body is optional; when present it must be a JSON object.
///
/// # Errors
///
/// - **404 Not Found**: unknown tool name
/// - **400 Bad Request**: body is not an object
pub async fn tool_call_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolCallResponse>, AppError> {
    let args: Option<Value> = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let value = serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))?;
        Some(value)
    };

    let output = state.tools.call(&name, args.as_ref()).await?;

    Ok(Json(output.into()))
}
