//! Runner binary resolution.
//!
//! The project-local installation wins: `<working_dir>/node_modules/.bin`
//! is checked before the `PATH`. A miss produces an actionable error
//! naming the install command.

use std::path::{Path, PathBuf};

use frontstage_core::{RunnerKind, TaskError};
use tracing::debug;

/// Candidate file names for a runner binary, platform-dependent.
fn local_candidates(kind: RunnerKind) -> Vec<String> {
    let name = kind.command();
    if cfg!(windows) {
        vec![format!("{name}.cmd"), format!("{name}.bat"), name.to_string()]
    } else {
        vec![name.to_string()]
    }
}

/// Locate the runner binary for `kind`, preferring the project-local
/// `node_modules/.bin` over the `PATH`.
pub(crate) fn resolve_runner(kind: RunnerKind, working_dir: &Path) -> Result<PathBuf, TaskError> {
    let bin_dir = working_dir.join("node_modules").join(".bin");
    for candidate in local_candidates(kind) {
        let local = bin_dir.join(&candidate);
        if local.is_file() {
            debug!(path = %local.display(), "Using project-local runner");
            return Ok(local);
        }
    }

    match which::which(kind.command()) {
        Ok(path) => {
            debug!(path = %path.display(), "Using runner from PATH");
            Ok(path)
        }
        Err(_) => Err(TaskError::RunnerNotFound {
            runner: kind.command().to_string(),
            hint: format!(
                "not in {} and not on PATH; install it with `npm install {kind}` \
                 or `npm install -g {kind}-cli`",
                bin_dir.display()
            ),
        }),
    }
}
