//! Notion API access.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   web handlers / CLI         │
//! └──────────────┬───────────────┘
//!                │ NotionApi (trait)
//!                ▼
//! ┌──────────────────────────────┐
//! │   NotionClient (reqwest)     │
//! │   - query_database()         │
//! │   - retrieve_database()      │
//! └──────────────┬───────────────┘
//!                │ HTTPS + JSON
//!                ▼
//!        api.notion.com/v1
//! ```

mod client;
mod error;
mod provider;
pub mod types;

pub use client::NotionClient;
pub use error::{NotionError, NotionResult};
pub use provider::NotionApi;
pub use types::{DatabaseSchema, PropertyDefinition, QueryResponse, Record, SelectOption};
