//! REST services, one per backend resource family.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each method builds a path under its resource root and hands the request to
//! the shared [`HttpTransport`](crate::net::HttpTransport). Results and errors
//! come back untouched.

pub mod access;
pub mod institutions;

pub use access::AccessService;
pub use institutions::EducationalInstitutionsService;

use serde::Serialize;
use serde_json::Value;

use crate::net::ApiError;

/// Serialize a caller payload once, before anything is sent.
pub(crate) fn to_body<T: Serialize + ?Sized>(data: &T) -> Result<Value, ApiError> {
    serde_json::to_value(data).map_err(|e| ApiError::Encode(e.to_string()))
}
