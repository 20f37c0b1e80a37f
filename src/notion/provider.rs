//! NotionApi trait definition.
//!
//! Handlers only ever see this trait, so tests can swap the HTTP client for
//! an in-memory stub.

use async_trait::async_trait;

use super::error::NotionResult;
use super::types::{DatabaseSchema, QueryResponse};

/// The two Notion operations the gallery needs.
///
/// # Example
///
/// ```ignore
/// use notion_gallery::notion::NotionApi;
///
/// async fn example(api: &impl NotionApi) -> NotionResult<()> {
///     let page = api.query_database("d9824bdc84454327be8b5b47500af6ce").await?;
///     let schema = api.retrieve_database("d9824bdc84454327be8b5b47500af6ce").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Query the first page of records in a database.
    async fn query_database(&self, database_id: &str) -> NotionResult<QueryResponse>;

    /// Retrieve a database's schema.
    async fn retrieve_database(&self, database_id: &str) -> NotionResult<DatabaseSchema>;
}
