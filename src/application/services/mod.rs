//! Business logic services for the application layer.

pub mod animal_service;
pub mod health_service;

pub use animal_service::AnimalService;
pub use health_service::HealthService;
