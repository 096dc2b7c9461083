//! Educational institutions and everything nested under them: classes,
//! resources, and comments.
//!
//! Paths are built by pure functions below so the exact URLs can be checked
//! without a transport.

#[cfg(test)]
#[path = "institutions_test.rs"]
mod institutions_test;

use std::sync::Arc;

use serde::Serialize;

use super::to_body;
use crate::net::{ApiError, ApiRequest, ApiResponse, HttpTransport};

const RESOURCE_ENDPOINT: &str = "/educational-institutions";

#[derive(Clone)]
pub struct EducationalInstitutionsService {
    http: Arc<dyn HttpTransport>,
}

/// Every method returns the transport's result unchanged.
///
/// # Errors
///
/// All methods propagate [`ApiError`] from the transport; `create*` methods
/// also fail with [`ApiError::Encode`] if `data` cannot be serialized.
#[allow(clippy::missing_errors_doc)]
impl EducationalInstitutionsService {
    pub fn new(http: Arc<dyn HttpTransport>) -> Self {
        Self { http }
    }

    async fn get_path(&self, path: String) -> Result<ApiResponse, ApiError> {
        self.http.send(ApiRequest::get(path)).await
    }

    async fn post_path<T: Serialize + ?Sized>(&self, path: String, data: &T) -> Result<ApiResponse, ApiError> {
        let body = to_body(data)?;
        self.http.send(ApiRequest::post(path, body)).await
    }

    // -------------------------------------------------------------------------
    // institutions
    // -------------------------------------------------------------------------

    pub async fn get_all(&self) -> Result<ApiResponse, ApiError> {
        self.get_path(institutions_path()).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.get_path(institution_path(id)).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<ApiResponse, ApiError> {
        self.post_path(institutions_path(), data).await
    }

    // -------------------------------------------------------------------------
    // classes
    // -------------------------------------------------------------------------

    pub async fn get_all_classes(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.get_path(classes_path(id)).await
    }

    pub async fn create_class<T: Serialize + ?Sized>(&self, id: &str, data: &T) -> Result<ApiResponse, ApiError> {
        self.post_path(classes_path(id), data).await
    }

    pub async fn get_class(&self, id: &str, class_id: &str) -> Result<ApiResponse, ApiError> {
        self.get_path(class_path(id, class_id)).await
    }

    // -------------------------------------------------------------------------
    // resources
    // -------------------------------------------------------------------------

    pub async fn get_all_resources(&self, id: &str, class_id: &str) -> Result<ApiResponse, ApiError> {
        self.get_path(resources_path(id, class_id)).await
    }

    pub async fn create_resource<T: Serialize + ?Sized>(
        &self,
        id: &str,
        class_id: &str,
        data: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.post_path(resources_path(id, class_id), data).await
    }

    pub async fn get_resource(&self, id: &str, class_id: &str, resource_id: &str) -> Result<ApiResponse, ApiError> {
        self.get_path(format!("{}/{resource_id}", resources_path(id, class_id))).await
    }

    // -------------------------------------------------------------------------
    // comments
    // -------------------------------------------------------------------------

    pub async fn get_all_comments(&self, id: &str, class_id: &str) -> Result<ApiResponse, ApiError> {
        self.get_path(comments_path(id, class_id)).await
    }

    pub async fn create_comment<T: Serialize + ?Sized>(
        &self,
        id: &str,
        class_id: &str,
        data: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.post_path(comments_path(id, class_id), data).await
    }

    pub async fn get_comment(&self, id: &str, class_id: &str, comment_id: &str) -> Result<ApiResponse, ApiError> {
        self.get_path(format!("{}/{comment_id}", comments_path(id, class_id))).await
    }
}

// =============================================================================
// PATHS
// =============================================================================

fn institutions_path() -> String {
    RESOURCE_ENDPOINT.to_owned()
}

fn institution_path(id: &str) -> String {
    format!("{RESOURCE_ENDPOINT}/{id}")
}

fn classes_path(id: &str) -> String {
    format!("{RESOURCE_ENDPOINT}/{id}/classes")
}

fn class_path(id: &str, class_id: &str) -> String {
    format!("{RESOURCE_ENDPOINT}/{id}/classes/{class_id}")
}

fn resources_path(id: &str, class_id: &str) -> String {
    format!("{RESOURCE_ENDPOINT}/{id}/classes/{class_id}/resources")
}

fn comments_path(id: &str, class_id: &str) -> String {
    format!("{RESOURCE_ENDPOINT}/{id}/classes/{class_id}/comments")
}
