//! # Notion Gallery
//!
//! A small web backend that serves a Notion database as an image gallery.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Browser (embedded ui/)                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │  GET /api/data, /api/platforms, /api/statuses
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 web (axum handlers)                      │
//! │   records: errors → 500    options: errors → []          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!            ┌─────────────┴──────────────┐
//!            ▼                            ▼
//! ┌──────────────────────┐    ┌──────────────────────────────┐
//! │  notion (NotionApi)  │───▶│  options (extract_options)    │
//! │  query / retrieve    │    │  alias match → sorted set     │
//! └──────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Nothing is cached: every request reads the current records or schema from
//! Notion.

pub mod config;
pub mod notion;
pub mod options;
pub mod web;

pub use config::Settings;
pub use notion::{NotionApi, NotionClient, NotionError};
pub use options::{extract_options, OptionCategory};
