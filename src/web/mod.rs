//! Web layer serving the browser front end.
//!
//! Uses Askama templates for server-side rendering; the pages call the REST
//! API from JavaScript.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
