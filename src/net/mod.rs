//! Networking for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the shared transport (base URL + static headers) and the
//! request/response envelope; `error` defines what a failed call surfaces.

pub mod error;
pub mod http;

pub use error::ApiError;
pub use http::{ApiRequest, ApiResponse, HttpClient, HttpTransport};

// =============================================================================
// TEST HELPERS
// =============================================================================
