//! Shared HTTP transport for the REST backend.
//!
//! DESIGN
//! ======
//! One client, one base URL, two static headers. Every call is independent:
//! no retries, no interceptors, no timeouts beyond the `reqwest` defaults.
//! Services depend on the [`HttpTransport`] trait rather than on `reqwest`
//! directly so tests can swap in a recording mock.
//!
//! ERROR HANDLING
//! ==============
//! A non-2xx answer is an error carrying the status and the decoded body,
//! mirroring a rejected promise; callers decide how to present it.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::Method;
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

// =============================================================================
// ENVELOPE
// =============================================================================

/// A request relative to the transport's base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path beginning with `/`, e.g. `/educational-institutions/5`.
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::POST, path: path.into(), body: Some(body) }
    }
}

/// A 2xx response. `data` is the JSON body, `null` when empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

impl ApiResponse {
    /// Decode `data` into a typed model.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        T::deserialize(&self.data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends [`ApiRequest`]s somewhere. Enables mocking in tests.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait HttpTransport: Send + Sync {
    /// Send one request and wait for its response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] when no response arrives and
    /// [`ApiError::Status`] for a non-2xx response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport with a fixed base URL and default headers.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client rooted at `base_url`. A trailing `/` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if `reqwest` cannot build the
    /// client (e.g. TLS backend initialisation fails).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl HttpTransport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "api request");

        let builder = self.http.request(request.method, &url);
        let builder = if let Some(body) = request.body {
            builder.json(&body)
        } else {
            builder
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let data = parse_body(&text);

        if !(200..300).contains(&status) {
            tracing::debug!(status, %url, "api error response");
            return Err(ApiError::Status { status, body: data });
        }
        Ok(ApiResponse { status, data })
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers
}

/// Empty bodies become `null`; non-JSON bodies are kept as a JSON string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}
