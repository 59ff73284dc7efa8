//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AnimalService, HealthService};
use crate::config::Config;
use crate::domain::gateways::{HttpTransport, ToolSelector};
use crate::tools::ToolRegistry;

/// Application state shared across requests.
///
/// Cloning is cheap: every field is reference-counted. All services share the
/// one transport (and its connection pool) handed to [`AppState::new`].
#[derive(Clone)]
pub struct AppState {
    pub animal_service: Arc<AnimalService<dyn HttpTransport>>,
    pub health_service: Arc<HealthService<dyn HttpTransport>>,
    pub tools: Arc<ToolRegistry<dyn HttpTransport>>,
    pub selector: Arc<dyn ToolSelector>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds services over `transport` using the endpoints and timeouts in `config`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        selector: Arc<dyn ToolSelector>,
        config: Config,
    ) -> Self {
        let animal_service = Arc::new(AnimalService::new(
            transport.clone(),
            config.endpoints.clone(),
            config.http_timeout,
        ));
        let health_service = Arc::new(HealthService::new(
            transport,
            config.endpoints.clone(),
            config.health_timeout,
        ));
        let tools = Arc::new(ToolRegistry::new(
            animal_service.clone(),
            health_service.clone(),
        ));

        Self {
            animal_service,
            health_service,
            tools,
            selector,
            config: Arc::new(config),
        }
    }
}
