//! `reqwest` implementation of [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use tracing::debug;

use crate::domain::errors::TransportFailure;
use crate::domain::gateways::{HttpTransport, TransportResponse};

/// HTTP transport sharing one `reqwest` connection pool across requests.
///
/// Cloning is cheap; clones share the same pool. Dropping an in-flight
/// request future cancels the request and releases its connection.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the crate's user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one shared with other components.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportFailure> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!(url, status, bytes = body.len(), "Upstream response received");

        Ok(TransportResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Maps `reqwest` errors onto transport failures.
///
/// Anything that is neither a timeout nor a body/decode problem is reported
/// as a connection failure.
fn map_reqwest_error(e: reqwest::Error) -> TransportFailure {
    if e.is_timeout() {
        TransportFailure::Timeout
    } else if e.is_body() || e.is_decode() {
        TransportFailure::Decode(e.to_string())
    } else {
        TransportFailure::Connect(e.to_string())
    }
}
