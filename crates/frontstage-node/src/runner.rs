//! `TaskRunner` implementation for grunt and gulp.
//!
//! The two kinds share every piece of this code; only the bound binary
//! differs. Execution is blocking with no timeout: the task runs to
//! natural completion and the exit status decides the outcome.

use async_trait::async_trait;
use frontstage_core::{RunnerKind, TaskError, TaskInvocation, TaskRunner};
use tracing::{debug, info};

use crate::command::{build_command, spawn_log_readers};
use crate::resolve::resolve_runner;

/// Split the free-form argument string into an argv.
///
/// Empty (or all-whitespace) means "run the default task, no extra
/// arguments". Shell-style quoting is honored; unbalanced quotes are
/// rejected rather than guessed at.
fn split_arguments(arguments: &str) -> Result<Vec<String>, TaskError> {
    if arguments.trim().is_empty() {
        return Ok(Vec::new());
    }
    shlex::split(arguments).ok_or_else(|| TaskError::InvalidArguments(arguments.to_string()))
}

/// Frontend task runner backed by a Node binary (grunt or gulp).
pub struct NodeTaskRunner {
    kind: RunnerKind,
}

impl NodeTaskRunner {
    /// Create a runner for the given kind.
    pub const fn new(kind: RunnerKind) -> Self {
        Self { kind }
    }

    /// The runner kind this instance binds to.
    pub const fn kind(&self) -> RunnerKind {
        self.kind
    }
}

#[async_trait]
impl TaskRunner for NodeTaskRunner {
    async fn execute(&self, invocation: &TaskInvocation) -> Result<(), TaskError> {
        let args = split_arguments(&invocation.arguments)?;
        let program = resolve_runner(self.kind, &invocation.working_dir)?;

        info!(
            runner = %self.kind,
            args = %invocation.arguments,
            cwd = %invocation.working_dir.display(),
            "Running task"
        );

        let mut child = build_command(&program, &args, &invocation.working_dir)
            .spawn()
            .map_err(|e| TaskError::SpawnFailed(format!("{}: {e}", program.display())))?;

        spawn_log_readers(&mut child, self.kind.command());

        let status = child.wait().await?;
        debug!(runner = %self.kind, status = %status, "Task finished");

        if status.success() {
            Ok(())
        } else {
            Err(TaskError::TaskFailed { status })
        }
    }
}
