//! HTTP client for the Notion REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{NotionError, NotionResult};
use super::provider::NotionApi;
use super::types::{DatabaseSchema, ErrorBody, QueryResponse};
use crate::config::NotionSettings;

/// Header carrying the API version.
const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// [`NotionApi`] implementation backed by `reqwest`.
///
/// One instance is built at startup and shared by all requests. The token is
/// checked per call so that a missing credential surfaces as a request error
/// rather than a startup failure.
pub struct NotionClient {
    client: Client,
    base_url: String,
    token: String,
    notion_version: String,
}

impl NotionClient {
    /// Create a client from the `[notion]` settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(settings: &NotionSettings) -> NotionResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("notion-gallery/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            notion_version: settings.notion_version.clone(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, req: RequestBuilder) -> NotionResult<RequestBuilder> {
        if self.token.is_empty() {
            return Err(NotionError::MissingToken);
        }

        Ok(req
            .bearer_auth(&self.token)
            .header(NOTION_VERSION_HEADER, &self.notion_version))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> NotionResult<T> {
        let response = self.authorized(req)?.send().await?;
        decode_response(response).await
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn query_database(&self, database_id: &str) -> NotionResult<QueryResponse> {
        let url = format!("{}/databases/{database_id}/query", self.base_url);
        debug!(%url, "querying database");

        self.send(self.client.post(&url).json(&serde_json::json!({})))
            .await
    }

    async fn retrieve_database(&self, database_id: &str) -> NotionResult<DatabaseSchema> {
        let url = format!("{}/databases/{database_id}", self.base_url);
        debug!(%url, "retrieving database schema");

        self.send(self.client.get(&url)).await
    }
}

/// Decode a success body, or turn an error body into [`NotionError::Api`].
async fn decode_response<T: DeserializeOwned>(response: Response) -> NotionResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(err) if !err.message.is_empty() => Err(NotionError::api(
            err.status.unwrap_or(status.as_u16()),
            err.code,
            err.message,
        )),
        _ => Err(NotionError::api(
            status.as_u16(),
            "unknown",
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        )),
    }
}
