//! Configuration module for the gallery server.
//!
//! Handles the settings file, environment variables and startup validation.

mod settings;

pub use settings::{
    expand_env_vars, expand_env_vars_or_empty, NotionSettings, ServerSettings, SessionSettings,
    Settings, SettingsError, CONFIG_PATH_VAR, NOTION_DATABASE_VAR, NOTION_TOKEN_VAR,
    SESSION_SECRET_VAR,
};
