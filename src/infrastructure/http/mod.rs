//! Outbound HTTP transport backed by a pooled `reqwest` client.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
