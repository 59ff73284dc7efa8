//! Infrastructure layer for external integrations.
//!
//! This layer implements the gateway traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`http`] - `reqwest`-backed outbound HTTP transport
//! - [`selector`] - Keyword and Ollama tool selectors

pub mod http;
pub mod selector;
