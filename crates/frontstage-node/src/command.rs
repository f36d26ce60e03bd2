//! Command construction and log streaming for runner processes.
//!
//! Child stdout/stderr are piped and forwarded line by line into
//! `tracing`, so the runner's output flows through the host's logging
//! rather than a process-global sink.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{info, warn};

/// Build the runner command: program, split arguments, working directory,
/// piped stdio.
pub(crate) fn build_command(program: &Path, args: &[String], working_dir: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(working_dir)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped());
    cmd
}

/// Spawn background tasks that forward the child's output into tracing.
///
/// stdout lines are logged at info, stderr at warn. The tasks exit when
/// the streams close.
pub(crate) fn spawn_log_readers(child: &mut Child, runner: &'static str) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();
            while let Ok(Some(text)) = lines.next_line().await {
                info!(runner = %runner, "{text}");
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();
            while let Ok(Some(text)) = lines.next_line().await {
                warn!(runner = %runner, "{text}");
            }
        });
    }
}
