//! Environment-backed configuration helpers

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is not set
    #[error("{0} environment variable not set")]
    Missing(String),

    /// A variable is set but empty or whitespace
    #[error("{0} environment variable is empty")]
    Empty(String),

    /// A variable is set but cannot be parsed
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
}

/// Read a required, non-empty environment variable
pub fn require_env(name: &str) -> Result<String, EnvError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(EnvError::Empty(name.to_string())),
        Ok(value) => Ok(value),
        Err(_) => Err(EnvError::Missing(name.to_string())),
    }
}

/// Read an optional environment variable, treating blank values as unset
pub fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read an environment variable or fall back to `default`
pub fn env_or(name: &str, default: &str) -> String {
    optional_env(name).unwrap_or_else(|| default.to_string())
}

/// Read and parse an optional environment variable
///
/// Unset or blank yields `Ok(None)`; a value that does not parse is an error.
pub fn parse_env<T>(name: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    optional_env(name)
        .map(|raw| parse_value(name, &raw))
        .transpose()
}

/// Parse a raw configuration value, naming the variable on failure
pub fn parse_value<T>(name: &str, raw: &str) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| EnvError::Invalid {
        name: name.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Read a comma-separated list from the environment
///
/// Returns `None` when the variable is unset so callers can apply their own
/// defaults; a set-but-blank variable yields an empty list.
pub fn env_list(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|raw| split_list(&raw))
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
