//! HTML template rendering handlers for the web front end.

mod about;
mod index;

pub use about::about_handler;
pub use index::index_handler;
