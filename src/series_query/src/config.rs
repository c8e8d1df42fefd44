//! Application configuration.
//!
//! Settings come from an optional TOML file:
//!
//! ```toml
//! database_url = "sqlite://data/datapoints.db"
//! busy_timeout_ms = 5000
//! ```
//!
//! The `DATABASE_URL` environment variable, when set, overrides the file.
//! Having neither is a [`ConfigError::MissingEnvVar`].

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use shared_utils::{ConfigError, get_env_var_opt};

use crate::db::connection::DEFAULT_BUSY_TIMEOUT_MS;

/// Name of the environment variable that overrides `database_url`.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// TOML file shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// SQLite path or `sqlite://` URL.
    pub database_url: Option<String>,
    /// SQLite busy_timeout in milliseconds.
    pub busy_timeout_ms: Option<u32>,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite path or `sqlite://` URL.
    pub database_url: String,
    /// SQLite busy_timeout in milliseconds.
    pub busy_timeout_ms: u32,
}

impl AppConfig {
    /// Merge a parsed file with an optional database URL override.
    pub fn resolve(file: ConfigFile, url_override: Option<String>) -> Result<Self, ConfigError> {
        let database_url = url_override
            .or(file.database_url)
            .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_URL_VAR.to_string()))?;
        Ok(Self {
            database_url,
            busy_timeout_ms: file.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
        })
    }

    /// Parse a TOML string and apply `url_override`.
    pub fn from_toml_str(toml_str: &str, url_override: Option<String>) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str).context("failed to parse config TOML")?;
        Ok(Self::resolve(file, url_override)?)
    }

    /// Load from an optional file, then apply the `DATABASE_URL` environment variable.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let env_url = get_env_var_opt(DATABASE_URL_VAR)?;
        match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("read config file {}", p.display()))?;
                Self::from_toml_str(&text, env_url)
            }
            None => Ok(Self::resolve(ConfigFile::default(), env_url)?),
        }
    }
}
