//! Errors surfaced by REST calls.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// A failed REST call, passed up to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("API request failed: {0}")]
    Request(String),

    /// The backend answered with a non-2xx status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: Value },

    /// The payload could not be serialized to JSON.
    #[error("payload encode failed: {0}")]
    Encode(String),

    /// The response body did not match the requested type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable reason from the backend's `{"detail": "..."}` body.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        match body {
            Value::String(s) if !s.is_empty() => Some(s.as_str()),
            Value::Object(map) => map.get("detail").and_then(Value::as_str),
            _ => None,
        }
    }
}
