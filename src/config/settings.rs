//! TOML-based configuration for the gallery server.
//!
//! Supports a config file (gallery.toml) with environment variable expansion,
//! or plain environment variables when no file is present.
//!
//! `${VAR}` and `$VAR` are expanded in every string value; write `$$` for a
//! literal `$`. An unset variable is an error, except in `notion.token` and
//! `notion.database_id`: those expand to an empty string so the missing value
//! is reported per request rather than at startup.
//!
//! Example configuration:
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [notion]
//! token = "${NOTION_INTEGRATION_SECRET}"
//! database_id = "${NOTION_DATABASE_ID}"
//! timeout_secs = 60
//!
//! [session]
//! secret = "${SESSION_SECRET}"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the session signing secret.
pub const SESSION_SECRET_VAR: &str = "SESSION_SECRET";
/// Environment variable holding the Notion integration token.
pub const NOTION_TOKEN_VAR: &str = "NOTION_INTEGRATION_SECRET";
/// Environment variable holding the Notion database id.
pub const NOTION_DATABASE_VAR: &str = "NOTION_DATABASE_ID";
/// Environment variable pointing at a config file.
pub const CONFIG_PATH_VAR: &str = "GALLERY_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Session secret is not set (set {SESSION_SECRET_VAR} or [session] secret)")]
    MissingSessionSecret,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP listener settings.
    pub server: ServerSettings,

    /// Notion API settings.
    pub notion: NotionSettings,

    /// Session settings.
    pub session: SessionSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerSettings {
    /// `host:port` string for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Notion API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotionSettings {
    /// Integration token. May be empty; calls then fail at request time.
    pub token: String,

    /// Database whose records and schema are served.
    pub database_id: String,

    /// API root, without trailing slash.
    pub api_base_url: String,

    /// Value sent in the `Notion-Version` header.
    pub notion_version: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_base_url: "https://api.notion.com/v1".to_string(),
            notion_version: "2022-06-28".to_string(),
            timeout_secs: 60,
        }
    }
}

impl NotionSettings {
    /// The configured database id, or `None` if it is blank.
    pub fn database_id(&self) -> Option<&str> {
        let id = self.database_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

/// Session settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Secret for signing session data. Required; there is no default.
    pub secret: String,
}

impl Settings {
    /// Load settings from a TOML file, expanding `${VAR}` references.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text, expanding `${VAR}` references.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.expand_env()?;
        Ok(settings)
    }

    /// Build settings from environment variables only.
    ///
    /// - `SESSION_SECRET`: session secret
    /// - `NOTION_INTEGRATION_SECRET`: Notion token (optional)
    /// - `NOTION_DATABASE_ID`: database id (optional)
    /// - `GALLERY_HOST` / `GALLERY_PORT`: listener (optional)
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Settings::default();

        settings.session.secret = env::var(SESSION_SECRET_VAR).unwrap_or_default();
        settings.notion.token = env::var(NOTION_TOKEN_VAR).unwrap_or_default();
        settings.notion.database_id = env::var(NOTION_DATABASE_VAR).unwrap_or_default();

        if let Ok(host) = env::var("GALLERY_HOST") {
            settings.server.host = host;
        }
        if let Ok(port) = env::var("GALLERY_PORT") {
            settings.server.port = port
                .parse()
                .map_err(|_| SettingsError::InvalidConfig(format!("GALLERY_PORT={port}")))?;
        }

        Ok(settings)
    }

    /// Load settings from the default locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `GALLERY_CONFIG`
    /// 2. `./gallery.toml`
    /// 3. `~/.config/notion-gallery/config.toml`
    /// 4. Plain environment variables
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("gallery.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("notion-gallery").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Self::from_env()
    }

    /// Check the settings are usable for serving.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.session.secret.trim().is_empty() {
            return Err(SettingsError::MissingSessionSecret);
        }
        if self.notion.api_base_url.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "notion.api_base_url is empty".to_string(),
            ));
        }
        Ok(())
    }

    fn expand_env(&mut self) -> Result<(), SettingsError> {
        for value in [
            &mut self.server.host,
            &mut self.notion.api_base_url,
            &mut self.notion.notion_version,
            &mut self.session.secret,
        ] {
            *value = expand_env_vars(value)?;
        }

        // Unset credentials are reported when a request needs them.
        for value in [&mut self.notion.token, &mut self.notion.database_id] {
            *value = expand_env_vars_or_empty(value)?;
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax; `$$` is a literal `$`.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    expand_with(s, |name| {
        env::var(name).map_err(|_| SettingsError::MissingEnvVar(name.to_string()))
    })
}

/// Like [`expand_env_vars`], but an unset variable expands to `""`.
pub fn expand_env_vars_or_empty(s: &str) -> Result<String, SettingsError> {
    expand_with(s, |name| Ok(env::var(name).unwrap_or_default()))
}

fn expand_with<F>(s: &str, lookup: F) -> Result<String, SettingsError>
where
    F: Fn(&str) -> Result<String, SettingsError>,
{
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        if chars.peek() == Some(&'$') {
            chars.next();
            result.push('$');
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    var_name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        result.push_str(&lookup(&var_name)?);
    }

    Ok(result)
}
