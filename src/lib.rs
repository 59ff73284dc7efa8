//! # Petting Zootopia
//!
//! Random duck, dog and cat pictures behind a small tool API, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Animal and health entities, fetch errors, gateway traits
//! - **Application Layer** ([`application`]) - Fetching with fallback, health probing
//! - **Infrastructure Layer** ([`infrastructure`]) - `reqwest` transport and tool selectors
//! - **Tools** ([`tools`]) - Named tools and the JSON-RPC envelope
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML front end
//!
//! ## Features
//!
//! - Dog images fall back to a second API when the first one misbehaves
//! - Transport failures classified into a small error taxonomy with user-facing messages
//! - Free-text requests routed by keyword matching, a local Ollama model or Claude
//! - Per-IP rate limiting and structured logging
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: route free text through Ollama
//! export AI_BACKEND=ollama
//!
//! # Start the service
//! cargo run
//!
//! # Or use the CLI
//! cargo run --bin zoo -- fetch duck
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod tools;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AnimalService, HealthService};
    pub use crate::config::Config;
    pub use crate::domain::entities::{AnimalImage, AnimalKind, OverallHealth};
    pub use crate::domain::errors::FetchError;
    pub use crate::error::AppError;
    pub use crate::infrastructure::http::ReqwestTransport;
    pub use crate::infrastructure::selector::KeywordSelector;
    pub use crate::state::AppState;
    pub use crate::tools::ToolRegistry;
}
