//! Sign-in and sign-up endpoints.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use std::sync::Arc;

use serde::Serialize;

use super::to_body;
use crate::net::{ApiError, ApiRequest, ApiResponse, HttpTransport};

const RESOURCE_ENDPOINT: &str = "/auth";

#[derive(Clone)]
pub struct AccessService {
    http: Arc<dyn HttpTransport>,
}

impl AccessService {
    pub fn new(http: Arc<dyn HttpTransport>) -> Self {
        Self { http }
    }

    /// `POST /auth/sign-in`.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error, e.g. `401` for bad credentials.
    pub async fn sign_in<T: Serialize + ?Sized>(&self, data: &T) -> Result<ApiResponse, ApiError> {
        self.http.send(ApiRequest::post(sign_in_path(), to_body(data)?)).await
    }

    /// `POST /auth/sign-up`.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error, e.g. `400` for a taken email.
    pub async fn sign_up<T: Serialize + ?Sized>(&self, data: &T) -> Result<ApiResponse, ApiError> {
        self.http.send(ApiRequest::post(sign_up_path(), to_body(data)?)).await
    }
}

fn sign_in_path() -> String {
    format!("{RESOURCE_ENDPOINT}/sign-in")
}

fn sign_up_path() -> String {
    format!("{RESOURCE_ENDPOINT}/sign-up")
}
