//! Web server module.
//!
//! Provides the JSON API consumed by the gallery page and serves the page
//! itself.

mod error;
mod handlers;
mod server;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{list_platforms, list_records, list_statuses, AppState};
pub use server::{router, serve};
