//! Configuration management for the Admiral CLI
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! TOML config file, `ADMIRAL_*` environment variables, and command-line
//! flags.

pub mod serde_utils;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use serde_utils::duration_secs;

/// Environment variable overriding the service URL
pub const URL_ENV: &str = "ADMIRAL_URL";

/// Environment variable overriding the auth token
pub const TOKEN_ENV: &str = "ADMIRAL_TOKEN";

/// Keys accepted by `config get` / `config set`
pub const KEYS: &[&str] = &[
    "url",
    "token",
    "insecure",
    "timeout",
    "task_poll_interval",
    "task_timeout",
];

/// Get the default configuration directory
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("admiral")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Connection settings for the orchestration service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the service
    pub url: String,

    /// Auth token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Accept invalid TLS certificates from the service
    pub insecure: bool,

    /// Per-request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,

    /// Delay between request tracker polls
    #[serde(with = "duration_secs")]
    pub task_poll_interval: Duration,

    /// Upper bound on waiting for an asynchronous request
    #[serde(with = "duration_secs")]
    pub task_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8282".to_string(),
            token: None,
            insecure: false,
            timeout: Duration::from_secs(30),
            task_poll_interval: Duration::from_secs(1),
            task_timeout: Duration::from_secs(300),
        }
    }
}

/// Values given as command-line flags
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub insecure: bool,
}

impl ClientConfig {
    /// Load the effective configuration.
    ///
    /// An explicitly given path must exist; a missing default file yields
    /// the built-in defaults.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(path, overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::load`] with an injectable environment lookup
    pub fn load_with_env<F>(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: ClientConfig = match path {
            Some(path) => load_config(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    load_config(&default_path)?
                } else {
                    tracing::debug!("No config file at {:?}, using defaults", default_path);
                    ClientConfig::default()
                }
            }
        };

        if let Some(url) = env(URL_ENV) {
            config.url = url;
        }
        if let Some(token) = env(TOKEN_ENV) {
            config.token = Some(token);
        }

        if let Some(url) = &overrides.url {
            config.url = url.clone();
        }
        if let Some(token) = &overrides.token {
            config.token = Some(token.clone());
        }
        if overrides.insecure {
            config.insecure = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no request could succeed with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "url must start with http:// or https://, got {:?}",
                self.url
            )));
        }
        if self.task_poll_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "task_poll_interval must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy of this config safe to print
    pub fn redacted(&self) -> Self {
        Self {
            token: self.token.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

/// Read a single key from a config document
pub fn get_key(content: &str, key: &str) -> Result<Option<toml::Value>, ConfigError> {
    if !KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }
    let table: toml::Table = toml::from_str(content)?;
    Ok(table.get(key).cloned())
}

/// Set a single key in a config document and return the new document.
///
/// The value is typed after the existing default (bool, integer or string)
/// and the result must still parse as a [`ClientConfig`].
pub fn set_key(content: &str, key: &str, value: &str) -> Result<String, ConfigError> {
    if !KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }
    let mut table: toml::Table = toml::from_str(content)?;

    let toml_value = if value == "true" {
        toml::Value::Boolean(true)
    } else if value == "false" {
        toml::Value::Boolean(false)
    } else if let Ok(i) = value.parse::<i64>() {
        toml::Value::Integer(i)
    } else {
        toml::Value::String(value.to_string())
    };
    table.insert(key.to_string(), toml_value);

    let new_content = toml::to_string_pretty(&table)?;
    let parsed: ClientConfig = toml::from_str(&new_content)?;
    parsed.validate()?;
    Ok(new_content)
}

/// Commented default configuration written by `config init`
pub fn default_config_document() -> String {
    r#"# Admiral CLI configuration

# Base URL of the orchestration service
url = "http://localhost:8282"

# Auth token (or set ADMIRAL_TOKEN)
# token = ""

# Accept self-signed service certificates
insecure = false

# Request timeout in seconds
timeout = 30

# Seconds between polls while waiting for a request to finish
task_poll_interval = 1

# Seconds to wait for a request before giving up
task_timeout = 300
"#
    .to_string()
}
