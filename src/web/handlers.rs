//! API handlers.
//!
//! `/api/data` surfaces every failure as a 500. The option endpoints only
//! surface a missing database id; any Notion failure degrades to an empty
//! list so the page can still render without filters.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{debug, error, warn};

use super::error::ApiError;
use crate::notion::{DatabaseSchema, NotionApi, NotionResult, Record};
use crate::options::OptionCategory;

// ============================================================================
// Shared State
// ============================================================================

/// State shared by all handlers. Built once at startup, never mutated.
pub struct AppState {
    /// Database to read from, `None` if unconfigured.
    database_id: Option<String>,
    /// Notion API handle.
    notion: Arc<dyn NotionApi>,
}

impl AppState {
    pub fn new(database_id: Option<String>, notion: Arc<dyn NotionApi>) -> Self {
        Self {
            database_id: database_id.filter(|id| !id.trim().is_empty()),
            notion,
        }
    }

    fn database_id(&self) -> Result<&str, ApiError> {
        self.database_id.as_deref().ok_or_else(|| {
            error!("NOTION_DATABASE_ID not configured");
            ApiError::DatabaseIdNotConfigured
        })
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/data - Records of the configured database (first page only).
pub async fn list_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let database_id = state.database_id()?;

    let page = state
        .notion
        .query_database(database_id)
        .await
        .map_err(|err| {
            error!(status = ?err.status(), "Error fetching data: {err}");
            ApiError::from(err)
        })?;

    debug!("Notion response: {} items found", page.results.len());
    if let Some(sample) = page.results.first() {
        debug!("Sample data structure: {sample}");
    }
    if page.has_more {
        warn!(
            returned = page.results.len(),
            "database has more records than the first page; remaining pages are not fetched"
        );
    }

    Ok(Json(page.results))
}

/// GET /api/platforms - Platform filter options.
pub async fn list_platforms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    list_options(&state, OptionCategory::Platform).await
}

/// GET /api/statuses - Status filter options.
pub async fn list_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    list_options(&state, OptionCategory::Status).await
}

async fn list_options(
    state: &AppState,
    category: OptionCategory,
) -> Result<Json<Vec<String>>, ApiError> {
    let database_id = state.database_id()?;

    let schema = state.notion.retrieve_database(database_id).await;
    let options = options_or_empty(category, schema);

    debug!("Available {category} options: {options:?}");
    Ok(Json(options))
}

/// Extract options from a fetched schema, or fall back to an empty list.
fn options_or_empty(
    category: OptionCategory,
    schema: NotionResult<DatabaseSchema>,
) -> Vec<String> {
    match schema {
        Ok(schema) => category.extract(&schema),
        Err(err) => {
            error!("Error fetching {category} options: {err}");
            Vec::new()
        }
    }
}
