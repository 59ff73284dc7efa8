//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{HealthRecord, HealthStatus, OverallHealth};

/// Health check response with one record per upstream API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub healthy_apis: usize,
    pub total_apis: usize,
    pub apis: Vec<HealthRecord>,
    pub checked_at: DateTime<Utc>,
}

impl From<OverallHealth> for HealthResponse {
    fn from(health: OverallHealth) -> Self {
        Self {
            status: health.status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            healthy_apis: health.healthy_count(),
            total_apis: health.total_count(),
            apis: health.apis,
            checked_at: health.checked_at,
        }
    }
}
