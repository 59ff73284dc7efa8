//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::domain::entities::HealthStatus;
use crate::state::AppState;

/// Probes the upstream animal APIs.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: every upstream API answered `200`
/// - **503 Service Unavailable**: at least one API is down
///
/// # Response
///
/// ```json
/// {
///   "status": "degraded",
///   "version": "0.1.0",
///   "healthyApis": 2,
///   "totalApis": 3,
///   "apis": [
///     { "api": "duck", "healthy": true, "latencyMs": 87 },
///     { "api": "dog", "healthy": false, "latencyMs": 5001, "error": "request timed out" },
///     { "api": "cat", "healthy": true, "latencyMs": 120 }
///   ],
///   "checkedAt": "2025-01-01T12:00:00Z"
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = state.health_service.check_all().await;

    let status = if health.status == HealthStatus::Healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(HealthResponse::from(health)))
}
