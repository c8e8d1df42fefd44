use std::env::VarError;

use crate::config::ConfigError;

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) => Ok(v),
        Err(VarError::NotPresent) => Err(ConfigError::MissingEnvVar(name.to_string())),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name.to_string())),
    }
}

/// Like [`get_env_var`], but a missing (or empty) variable is `Ok(None)`.
pub fn get_env_var_opt(name: &str) -> Result<Option<String>, ConfigError> {
    match get_env_var(name) {
        Ok(v) if v.trim().is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(ConfigError::MissingEnvVar(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
