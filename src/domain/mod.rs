//! Domain layer containing entities, the error taxonomy and gateway traits.
//!
//! # Architecture
//!
//! - [`entities`] - Animal kinds, fetched images, health records
//! - [`errors`] - Fetch error taxonomy and the transport failure classifier
//! - [`gateways`] - Traits for the outbound HTTP transport and tool selection
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Network access goes through [`gateways::HttpTransport`], supplied by the caller
//! - Fetch logic lives in [`crate::application::services`]

pub mod entities;
pub mod errors;
pub mod gateways;
