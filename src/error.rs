use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::tools::ToolError;

/// Seconds clients are asked to wait when upstream gives no `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    RateLimited { message: String, retry_after: u64 },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Upstream rate limiting; `retry_after` is the raw header value, if any.
    ///
    /// Non-numeric values (HTTP dates) fall back to the default delay.
    pub fn rate_limited(retry_after: Option<&str>) -> Self {
        let retry_after = retry_after
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECONDS);

        Self::RateLimited {
            message: "External API rate limited. Please try again later.".to_string(),
            retry_after,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl From<ToolError> for AppError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::UnknownTool(_) => AppError::not_found(e.to_string()),
            ToolError::InvalidArguments { .. } => AppError::bad_request(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(format!("Invalid request: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let retry_after = match &self {
            AppError::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        };

        let error = match &self {
            AppError::Internal(details) => {
                tracing::error!(error = %details, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            success: false,
            error,
            code,
            retry_after,
        };

        let mut response = (status, Json(body)).into_response();

        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(seconds));
        }

        response
    }
}
