//! Invocation lifecycle service.
//!
//! Sequences one end-to-end run: start the embedded server, execute the
//! external task, stop the server. Cleanup is guaranteed on every exit
//! path where startup succeeded. Start failures are fatal and the task
//! never runs; stop failures are downgraded to warnings — a task that
//! already completed is not reported as failed because cleanup had
//! trouble.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::TaskInvocation;
use crate::ports::{ServerError, ServerHandle, ServerManager, TaskError, TaskRunner};

/// Invocation-accounting state of the lifecycle.
///
/// Transitions are linear: `NotStarted → Starting → Running → Stopping →
/// Stopped`, with no restart transition. A start failure moves straight to
/// `Stopped`; a stop failure still ends at `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No invocation has begun.
    NotStarted,
    /// The server manager is starting.
    Starting,
    /// The server is up; the task may execute.
    Running,
    /// The server is shutting down.
    Stopping,
    /// Terminal state for this invocation.
    Stopped,
}

/// Failure of one invocation.
///
/// Stop failures never appear here; they are contained in
/// `post_execution` and logged.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The server manager failed to construct or start. The task runner
    /// was never invoked.
    #[error("Failed to launch embedded server")]
    Startup(#[from] ServerError),

    /// The external task runner reported failure. Cleanup still ran.
    #[error("Failed to run task")]
    Task(#[from] TaskError),
}

/// Runs one task against a freshly started embedded server.
///
/// Owns the `ServerHandle` for the duration of a single invocation; the
/// handle is never shared across invocations or persisted. Not intended
/// for concurrent invocations — one run completes before the next begins.
pub struct Invoker {
    server: Arc<dyn ServerManager>,
    state: Mutex<LifecycleState>,
}

impl Invoker {
    /// Create an invoker over a server manager.
    pub fn new(server: Arc<dyn ServerManager>) -> Self {
        Self {
            server,
            state: Mutex::new(LifecycleState::NotStarted),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn set_state(&self, next: LifecycleState) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        debug!(from = ?*state, to = ?next, "Lifecycle transition");
        *state = next;
    }

    /// Start the embedded server.
    ///
    /// A failure here aborts the invocation before any task runs.
    pub async fn pre_execution(&self) -> Result<ServerHandle, InvocationError> {
        self.set_state(LifecycleState::Starting);
        match self.server.start().await {
            Ok(handle) => {
                self.set_state(LifecycleState::Running);
                info!(port = %handle.port, "Embedded server started");
                Ok(handle)
            }
            Err(e) => {
                self.set_state(LifecycleState::Stopped);
                Err(InvocationError::Startup(e))
            }
        }
    }

    /// Stop the embedded server.
    ///
    /// A failure to stop is logged as a warning, not propagated: the
    /// invocation outcome is decided by the task, not by cleanup.
    pub async fn post_execution(&self, handle: ServerHandle) {
        self.set_state(LifecycleState::Stopping);
        if let Err(e) = self.server.stop(&handle).await {
            warn!(port = %handle.port, error = %e, "Failed to stop embedded server");
        } else {
            info!(port = %handle.port, "Embedded server stopped");
        }
        self.set_state(LifecycleState::Stopped);
    }

    /// Run one invocation: pre-execution, task, post-execution.
    ///
    /// `post_execution` runs exactly once whenever `pre_execution`
    /// succeeded, regardless of the task outcome.
    pub async fn run(
        &self,
        runner: &dyn TaskRunner,
        invocation: &TaskInvocation,
    ) -> Result<(), InvocationError> {
        let handle = self.pre_execution().await?;

        let task_result = runner.execute(invocation).await;

        self.post_execution(handle).await;

        task_result.map_err(InvocationError::Task)
    }
}
