//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod animal;
pub mod health;
pub mod mcp;
pub mod tools;

pub use animal::{animal_handler, animal_list_handler};
pub use health::health_handler;
pub use mcp::mcp_handler;
pub use tools::{tool_call_handler, tool_list_handler};
