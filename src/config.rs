//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_SESSION_FILE: &str = ".sec-session.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every service path is appended to, without a trailing `/`.
    pub base_url: String,
    /// Where the native session store keeps its keys.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), session_file: PathBuf::from(DEFAULT_SESSION_FILE) }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SEC_API_BASE_URL`: default `http://localhost:8000/api/v1`
    /// - `SEC_SESSION_FILE`: default `.sec-session.json`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a non-HTTP base URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a non-HTTP base URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match non_empty("SEC_API_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_owned(),
        };
        let session_file = non_empty("SEC_SESSION_FILE").map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        Ok(Self { base_url, session_file })
    }

    /// Replace the base URL, validating it the same way as the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a non-HTTP base URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    if rest.is_empty() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}
