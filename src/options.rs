//! Filter option discovery.
//!
//! The gallery offers platform and status filters. Their values come from the
//! database schema: every `select` or `multi_select` property whose name is a
//! known alias for the category contributes its declared options.

use std::collections::BTreeSet;
use std::fmt;

use crate::notion::DatabaseSchema;

/// Property names treated as the platform field.
pub const PLATFORM_ALIASES: &[&str] = &["platform", "type", "category"];

/// Property names treated as the status field.
pub const STATUS_ALIASES: &[&str] = &["status", "state"];

/// A semantic field category with its own set of property-name aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCategory {
    Platform,
    Status,
}

impl OptionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Status => "status",
        }
    }

    /// Lower-case property names recognised for this category.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Platform => PLATFORM_ALIASES,
            Self::Status => STATUS_ALIASES,
        }
    }

    /// Extract this category's options from a schema.
    pub fn extract(&self, schema: &DatabaseSchema) -> Vec<String> {
        extract_options(schema, self.aliases())
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collect the distinct option names of every property matching `aliases`.
///
/// Property names are compared case-insensitively. Properties that are not
/// `select` or `multi_select` contribute nothing. The result is sorted and
/// free of duplicates regardless of the schema's iteration order.
pub fn extract_options(schema: &DatabaseSchema, aliases: &[&str]) -> Vec<String> {
    let mut names = BTreeSet::new();

    for (name, definition) in &schema.properties {
        let name = name.to_lowercase();
        if !aliases.iter().any(|alias| alias.to_lowercase() == name) {
            continue;
        }

        for option in definition.options() {
            names.insert(option.name.clone());
        }
    }

    names.into_iter().collect()
}
