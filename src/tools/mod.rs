//! Tool surface shared by the REST API, the JSON-RPC endpoint and the CLI.
//!
//! - [`registry`] - Tool names, descriptors and dispatch
//! - [`jsonrpc`] - JSON-RPC 2.0 request handling

pub mod jsonrpc;
pub mod registry;

pub use registry::{Tool, ToolDescriptor, ToolError, ToolOutput, ToolRegistry};
