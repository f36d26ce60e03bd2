//! Server manager trait definition.
//!
//! This port defines the interface for the embedded server's lifecycle.
//! Implementations handle binding, serving, and shutdown internally; the
//! lifecycle core only sequences start and stop around task execution.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServerError;

/// Handle to a running embedded server.
///
/// Opaque to callers: returned by `start`, consumed by `stop`, never
/// reused. Lifecycle is strictly start → task execution → stop, at most
/// once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHandle {
    /// Port the server is bound to.
    pub port: u16,
    /// Unix timestamp (seconds) when the server was started.
    pub started_at: u64,
}

impl ServerHandle {
    /// Create a handle for a server bound to `port` now.
    pub fn new(port: u16) -> Self {
        let started_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self { port, started_at }
    }
}

/// Lifecycle manager for the embedded server.
///
/// This trait is the factory seam that keeps the server technology
/// swappable without touching invocation sequencing. Implementations are
/// constructed from a `ServerConfig` at the composition root.
#[async_trait]
pub trait ServerManager: Send + Sync {
    /// Start the server on the configured port.
    ///
    /// Returns a handle used to stop it. A failure here is fatal to the
    /// invocation; the task runner must never execute against a server
    /// that did not come up.
    async fn start(&self) -> Result<ServerHandle, ServerError>;

    /// Stop the server identified by `handle`.
    ///
    /// After a successful return the port is released. Implementations
    /// must reject handles they did not issue.
    async fn stop(&self, handle: &ServerHandle) -> Result<(), ServerError>;

    /// Check whether the server behind `handle` is still serving.
    async fn is_running(&self, handle: &ServerHandle) -> bool;
}
