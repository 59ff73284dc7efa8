//! JSON-RPC endpoint for tool clients.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::state::AppState;
use crate::tools::jsonrpc::{self, Request, RpcError};

/// Handles one JSON-RPC 2.0 message.
///
/// # Endpoint
///
/// `POST /mcp`
///
/// Protocol errors, including unparseable JSON, are reported inside the
/// envelope with `200 OK`.
/// Notifications are acknowledged with `202 Accepted` and no body.
pub async fn mcp_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            let response = jsonrpc::Response::err(RpcError::parse_error(e.to_string()), Value::Null);
            return Json(response).into_response();
        }
    };

    let id = body.get("id").cloned().unwrap_or(Value::Null);

    let request: Request = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => {
            let response = jsonrpc::Response::err(RpcError::invalid_request(e.to_string()), id);
            return Json(response).into_response();
        }
    };

    match jsonrpc::handle(state.tools.as_ref(), request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
