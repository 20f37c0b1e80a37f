//! Wire types for the Notion REST API.
//!
//! Only the parts of the payloads this crate reads are modeled. Records are
//! kept as raw JSON and forwarded untouched; database schemas are parsed into
//! a tagged [`PropertyDefinition`] so that an unexpected shape fails once, at
//! decode time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Records
// ============================================================================

/// A single database record (a Notion "page"), forwarded verbatim.
pub type Record = serde_json::Value;

/// One page of results from `POST /databases/{id}/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Records on this page.
    pub results: Vec<Record>,
    /// Whether the database holds more records past this page.
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page (unused, pagination is not followed).
    #[serde(default)]
    pub next_cursor: Option<String>,
}

// ============================================================================
// Database schema
// ============================================================================

/// Schema of a database, as returned by `GET /databases/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSchema {
    /// Property name to property definition.
    #[serde(default)]
    pub properties: HashMap<String, PropertyDefinition>,
}

impl DatabaseSchema {
    /// Build a schema from `(name, definition)` pairs.
    pub fn from_properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = (S, PropertyDefinition)>,
        S: Into<String>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, def)| (name.into(), def))
                .collect(),
        }
    }
}

/// Definition of one database property, keyed by its `type` tag.
///
/// Kinds other than `select` and `multi_select` carry no options this crate
/// cares about and collapse into [`PropertyDefinition::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyDefinition {
    Select { select: OptionList },
    MultiSelect { multi_select: OptionList },
    #[serde(other)]
    Other,
}

impl PropertyDefinition {
    /// A `select` property with the given option names.
    pub fn select<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Select {
            select: OptionList::from_names(names),
        }
    }

    /// A `multi_select` property with the given option names.
    pub fn multi_select<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MultiSelect {
            multi_select: OptionList::from_names(names),
        }
    }

    /// Options declared by this property, empty for non-select kinds.
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Select { select } => &select.options,
            Self::MultiSelect { multi_select } => &multi_select.options,
            Self::Other => &[],
        }
    }
}

/// The `options` wrapper shared by `select` and `multi_select`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OptionList {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl OptionList {
    fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: names.into_iter().map(SelectOption::named).collect(),
        }
    }
}

/// A selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            color: None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
