//! # sec-client
//!
//! Client core for the SEC educational platform: session persistence, route
//! guarding, and the REST services for institutions, classes, resources, and
//! comments.
//!
//! SYSTEM CONTEXT
//! ==============
//! A view action calls a service method, the service delegates to the shared
//! HTTP transport, and the result surfaces back to the caller unchanged. The
//! router guard runs before every navigation and consults only the session
//! store. [`app::SecClient`] owns all of these and stands in for the views.

pub mod app;
pub mod config;
pub mod models;
pub mod net;
pub mod router;
pub mod services;
pub mod state;
