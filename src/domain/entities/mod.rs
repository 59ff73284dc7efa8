//! Core domain entities.
//!
//! All entities are small immutable values produced and consumed within a
//! single request.
//!
//! # Entity Types
//!
//! - [`AnimalKind`] - The closed set of supported animals
//! - [`AnimalImage`] - A successfully fetched image URL
//! - [`HealthRecord`] / [`OverallHealth`] - Upstream API probe results

pub mod animal;
pub mod health;

pub use animal::{AnimalImage, AnimalKind, UnknownAnimal};
pub use health::{HealthRecord, HealthStatus, OverallHealth};
