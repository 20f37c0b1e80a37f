//! Notion client error types.

use thiserror::Error;

/// Result type for Notion API calls.
pub type NotionResult<T> = Result<T, NotionError>;

/// Errors that can occur while talking to the Notion API.
#[derive(Error, Debug)]
pub enum NotionError {
    /// No integration token was configured.
    #[error("API token is not configured")]
    MissingToken,

    /// The request could not be sent or the response could not be read.
    #[error("request to Notion failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Notion error code (e.g. `unauthorized`, `object_not_found`).
        code: String,
        /// Human-readable message from the API.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response from Notion: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NotionError {
    /// Create an API error from a status and error body.
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// HTTP status reported by the API, if this is an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the failure is an authentication problem.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::MissingToken => true,
            Self::Api { status, code, .. } => *status == 401 || code == "unauthorized",
            _ => false,
        }
    }
}
