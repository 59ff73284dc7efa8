//! Outbound HTTP transport abstraction.

use crate::domain::errors::TransportFailure;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A fully read response from an outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Raw `Retry-After` header value, if the upstream sent one.
    pub retry_after: Option<String>,
    pub body: String,
}

impl TransportResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            retry_after: None,
            body: body.into(),
        }
    }

    /// A response with the given status and an empty body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            retry_after: None,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`TransportFailure::Status`].
    pub fn error_for_status(self) -> Result<Self, TransportFailure> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportFailure::Status {
                code: self.status,
                retry_after: self.retry_after,
            })
        }
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportFailure> {
        serde_json::from_str(&self.body).map_err(|e| TransportFailure::Decode(e.to_string()))
    }
}

/// Performs a single bounded GET request.
///
/// Implementations must be safe to share between concurrent requests.
/// Non-2xx statuses are returned as responses, not failures, so callers can
/// inspect headers before classifying them.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ReqwestTransport`] - pooled `reqwest` client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues `GET url`, failing with [`TransportFailure::Timeout`] if no
    /// complete response arrives within `timeout`.
    ///
    /// # Errors
    ///
    /// - [`TransportFailure::Timeout`] when the deadline passes
    /// - [`TransportFailure::Connect`] on DNS/connect failures
    /// - [`TransportFailure::Decode`] when the body cannot be read
    async fn get(&self, url: &str, timeout: Duration)
    -> Result<TransportResponse, TransportFailure>;
}
