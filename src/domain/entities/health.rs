//! Health records produced by upstream API probes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Reachability of a single upstream API, built fresh for each probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub api: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthRecord {
    pub fn healthy(api: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            api: api.into(),
            healthy: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn unhealthy(api: impl Into<String>, latency_ms: u64, error: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            healthy: false,
            latency_ms: Some(latency_ms),
            error: Some(error.into()),
        }
    }
}

/// Aggregate status across all probed APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// `Healthy` when every API is reachable, `Unhealthy` when none is.
    pub fn from_counts(healthy: usize, total: usize) -> Self {
        if total > 0 && healthy == total {
            HealthStatus::Healthy
        } else if healthy > 0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Unhealthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

/// Result of probing every upstream API once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallHealth {
    pub status: HealthStatus,
    pub apis: Vec<HealthRecord>,
    pub checked_at: DateTime<Utc>,
}

impl OverallHealth {
    pub fn from_records(apis: Vec<HealthRecord>) -> Self {
        let healthy = apis.iter().filter(|r| r.healthy).count();
        Self {
            status: HealthStatus::from_counts(healthy, apis.len()),
            apis,
            checked_at: Utc::now(),
        }
    }

    pub fn healthy_count(&self) -> usize {
        self.apis.iter().filter(|r| r.healthy).count()
    }

    pub fn total_count(&self) -> usize {
        self.apis.len()
    }

    /// Plain-text report used by the `health_check` tool and the CLI.
    pub fn report(&self) -> String {
        let mut lines = vec![
            format!("Overall Status: {}", self.status.as_str().to_uppercase()),
            format!("Healthy APIs: {}/{}", self.healthy_count(), self.total_count()),
            String::new(),
        ];

        for api in &self.apis {
            let status = if api.healthy { "HEALTHY" } else { "UNHEALTHY" };
            let time = api
                .latency_ms
                .map(|ms| format!(" ({ms}ms)"))
                .unwrap_or_default();
            let error = api
                .error
                .as_ref()
                .map(|e| format!(" - {e}"))
                .unwrap_or_default();
            lines.push(format!("{}: {status}{time}{error}", api.api.to_uppercase()));
        }

        lines.join("\n")
    }
}
