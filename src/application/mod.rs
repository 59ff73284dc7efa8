//! Application layer services implementing the fetch logic.
//!
//! Services receive their gateways (HTTP transport) and configuration through
//! their constructors and expose a small async API to the tool registry and
//! HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::animal_service::AnimalService`] - Per-animal fetchers, dog fallback, dispatch
//! - [`services::health_service::HealthService`] - Concurrent upstream reachability probes

pub mod services;
