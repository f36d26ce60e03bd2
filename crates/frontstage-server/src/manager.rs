//! `ServerManager` implementation over axum.
//!
//! One manager owns at most one running server instance. `start` binds
//! the configured port eagerly, so a port conflict surfaces as a start
//! failure before the task runs; `stop` triggers graceful shutdown and
//! waits for the serve task with a bounded timeout.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use frontstage_core::{ServerConfig, ServerError, ServerHandle, ServerManager};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::readiness::wait_for_http_ready;
use crate::routes::build_router;

/// Seconds to wait for the serve task to finish after shutdown is signaled.
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Seconds to wait for the freshly spawned server to answer.
const STARTUP_TIMEOUT_SECS: u64 = 5;

struct RunningServer {
    handle: ServerHandle,
    shutdown: oneshot::Sender<()>,
    serve_task: JoinHandle<io::Result<()>>,
}

/// Embedded static server implementing the `ServerManager` port.
///
/// Constructed from a `ServerConfig` at the composition root; the server
/// technology stays swappable behind the trait.
pub struct HttpServerManager {
    config: ServerConfig,
    running: Mutex<Option<RunningServer>>,
}

impl HttpServerManager {
    /// Create a manager for the given configuration. Nothing is bound
    /// until `start`.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            running: Mutex::new(None),
        }
    }

    /// Port the manager will bind.
    pub const fn port(&self) -> u16 {
        self.config.port
    }
}

#[async_trait]
impl ServerManager for HttpServerManager {
    async fn start(&self) -> Result<ServerHandle, ServerError> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(ServerError::StartFailed(
                "Server is already running".to_string(),
            ));
        }

        let router = build_router(&self.config)?;

        let listener = TcpListener::bind(("127.0.0.1", self.config.port))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::AddrInUse => ServerError::PortInUse(self.config.port),
                _ => ServerError::StartFailed(e.to_string()),
            })?;

        // Resolved address, not the configured one: port 0 means "any free
        // port" and tests rely on that.
        let port = listener
            .local_addr()
            .map_err(|e| ServerError::StartFailed(e.to_string()))?
            .port();

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let serve_task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        // Confirm the serve task is accepting before handing out the handle
        if let Err(e) = wait_for_http_ready(port, STARTUP_TIMEOUT_SECS).await {
            serve_task.abort();
            return Err(ServerError::StartFailed(e.to_string()));
        }

        debug!(port = %port, "Embedded server accepting requests");

        let handle = ServerHandle::new(port);
        *running = Some(RunningServer {
            handle: handle.clone(),
            shutdown,
            serve_task,
        });

        Ok(handle)
    }

    async fn stop(&self, handle: &ServerHandle) -> Result<(), ServerError> {
        let mut running = self.running.lock().await;

        let Some(server) = running.take() else {
            return Err(ServerError::NotRunning(format!(
                "No server running on port {}",
                handle.port
            )));
        };

        if server.handle != *handle {
            let port = server.handle.port;
            *running = Some(server);
            return Err(ServerError::NotRunning(format!(
                "Handle for port {} was not issued by this manager (running: {port})",
                handle.port
            )));
        }

        // The receiver may already be gone if the serve task died
        let _ = server.shutdown.send(());

        match tokio::time::timeout(
            Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
            server.serve_task,
        )
        .await
        {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(e))) => Err(ServerError::StopFailed(e.to_string())),
            Ok(Err(join_err)) => Err(ServerError::StopFailed(join_err.to_string())),
            Err(_) => Err(ServerError::StopFailed(format!(
                "Server did not shut down within {SHUTDOWN_TIMEOUT_SECS}s"
            ))),
        }
    }

    async fn is_running(&self, handle: &ServerHandle) -> bool {
        let running = self.running.lock().await;
        running
            .as_ref()
            .is_some_and(|s| s.handle == *handle && !s.serve_task.is_finished())
    }
}
