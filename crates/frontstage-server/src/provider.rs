//! Context provider resolution.
//!
//! A context provider names the strategy for choosing the root mount of
//! the embedded server. The default (`static`) serves the project basedir;
//! `webapp` serves the conventional `src/main/webapp` layout. Unknown
//! names fail construction so a typo surfaces before the task runs.

use std::path::PathBuf;

use frontstage_core::{ServerConfig, ServerError};

/// Relative webapp root used by the `webapp` provider.
const WEBAPP_ROOT: &str = "src/main/webapp";

/// Resolve the root mount directory for the configured provider.
pub(crate) fn resolve_root_mount(config: &ServerConfig) -> Result<PathBuf, ServerError> {
    let root = match config.context_provider.as_deref() {
        None | Some("static") => config.basedir().clone(),
        Some("webapp") => config.basedir().join(WEBAPP_ROOT),
        Some(other) => {
            return Err(ServerError::Configuration(format!(
                "Unknown context provider '{other}' (expected 'static' or 'webapp')"
            )));
        }
    };

    if !root.is_dir() {
        return Err(ServerError::Configuration(format!(
            "Content root does not exist: {}",
            root.display()
        )));
    }

    Ok(root)
}
