//! Gateway trait definitions for the domain layer.
//!
//! These traits abstract the two outside collaborators the core talks to:
//! the outbound HTTP transport and the natural-language tool selector.
//! Concrete implementations live in `crate::infrastructure`.
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod http_transport;
pub mod tool_selector;

pub use http_transport::{HttpTransport, TransportResponse};
pub use tool_selector::{SelectorError, ToolChoice, ToolSelector, ToolSpec};

#[cfg(test)]
pub use http_transport::MockHttpTransport;
#[cfg(test)]
pub use tool_selector::MockToolSelector;
