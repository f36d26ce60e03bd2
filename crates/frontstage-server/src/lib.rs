//! Embedded HTTP server adapter for frontstage.
//!
//! Implements the `ServerManager` port with axum and tower-http: the
//! configured content roots are served for the duration of one task
//! invocation, then torn down gracefully.

#![deny(unsafe_code)]

mod manager;
mod provider;
mod readiness;
mod routes;

pub use manager::HttpServerManager;
pub use readiness::{check_http_ready, wait_for_http_ready};
