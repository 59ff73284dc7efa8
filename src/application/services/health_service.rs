//! Upstream API health probing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::ApiEndpoints;
use crate::domain::entities::{HealthRecord, OverallHealth};
use crate::domain::gateways::HttpTransport;

/// Service probing the upstream animal APIs.
///
/// Every call builds fresh records; nothing is cached between checks.
pub struct HealthService<T: HttpTransport + ?Sized> {
    transport: Arc<T>,
    endpoints: ApiEndpoints,
    timeout: Duration,
}

impl<T: HttpTransport + ?Sized> HealthService<T> {
    /// Creates a new health service.
    ///
    /// `timeout` bounds each individual probe.
    pub fn new(transport: Arc<T>, endpoints: ApiEndpoints, timeout: Duration) -> Self {
        Self {
            transport,
            endpoints,
            timeout,
        }
    }

    /// Probes the duck, dog and cat APIs concurrently.
    pub async fn check_all(&self) -> OverallHealth {
        let (duck, dog, cat) = tokio::join!(
            self.check_api("duck", &self.endpoints.duck_url),
            self.check_api("dog", &self.endpoints.dog_url),
            self.check_api("cat", &self.endpoints.cat_url),
        );

        OverallHealth::from_records(vec![duck, dog, cat])
    }

    /// Probes a single endpoint; only `200 OK` counts as healthy.
    pub async fn check_api(&self, name: &str, url: &str) -> HealthRecord {
        let start = Instant::now();
        let result = self.transport.get(url, self.timeout).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let record = match result {
            Ok(response) if response.status == 200 => HealthRecord::healthy(name, elapsed_ms),
            Ok(response) => {
                HealthRecord::unhealthy(name, elapsed_ms, format!("Status {}", response.status))
            }
            Err(failure) => HealthRecord::unhealthy(name, elapsed_ms, failure.to_string()),
        };

        debug!(api = name, healthy = record.healthy, "Health probe finished");
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::HealthStatus;
    use crate::domain::errors::TransportFailure;
    use crate::domain::gateways::{MockHttpTransport, TransportResponse};

    fn endpoints() -> ApiEndpoints {
        ApiEndpoints {
            duck_url: "https://duck.test".to_string(),
            dog_url: "https://dog.test".to_string(),
            dog_fallback_url: "https://dogfallback.test".to_string(),
            cat_url: "https://cat.test".to_string(),
        }
    }

    fn service(transport: MockHttpTransport) -> HealthService<MockHttpTransport> {
        HealthService::new(Arc::new(transport), endpoints(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_all_apis_healthy() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .times(3)
            .returning(|_, _| Ok(TransportResponse::ok("{}")));

        let health = service(transport).check_all().await;

        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.healthy_count(), 3);
        let names: Vec<&str> = health.apis.iter().map(|a| a.api.as_str()).collect();
        assert_eq!(names, vec!["duck", "dog", "cat"]);
    }

    #[tokio::test]
    async fn test_some_apis_down_is_degraded() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .withf(|url, _| url == "https://dog.test")
            .returning(|_, _| Ok(TransportResponse::status(502)));
        transport
            .expect_get()
            .withf(|url, _| url != "https://dog.test")
            .returning(|_, _| Ok(TransportResponse::ok("{}")));

        let health = service(transport).check_all().await;

        assert_eq!(health.status, HealthStatus::Degraded);
        let dog = health.apis.iter().find(|a| a.api == "dog").unwrap();
        assert!(!dog.healthy);
        assert_eq!(dog.error.as_deref(), Some("Status 502"));
    }

    #[tokio::test]
    async fn test_all_apis_down_is_unhealthy() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .times(3)
            .returning(|_, _| Err(TransportFailure::Timeout));

        let health = service(transport).check_all().await;

        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert!(
            health
                .apis
                .iter()
                .all(|a| a.error.as_deref() == Some("request timed out"))
        );
    }
}
