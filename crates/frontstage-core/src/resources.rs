//! Servable resource roots derived from resolved dependency artifacts.
//!
//! The host build hands over the paths of resolved project dependencies;
//! the directories among them become an ordered view the embedded server
//! may resolve resources from. This is the capability the original design
//! granted through a project class loader, expressed as a plain value.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Ordered, deduplicated set of existing resource directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceView {
    roots: Vec<PathBuf>,
}

impl ResourceView {
    /// Build a view from artifact paths.
    ///
    /// Order is preserved, duplicates are dropped, and entries that are not
    /// existing directories are skipped (archive unpacking is the host
    /// build's job, not ours).
    pub fn from_artifacts<P: AsRef<Path>>(artifacts: &[P]) -> Self {
        let mut seen = HashSet::new();
        let mut roots = Vec::new();

        for artifact in artifacts {
            let path = artifact.as_ref();
            if !path.is_dir() {
                debug!(path = %path.display(), "Skipping non-directory artifact");
                continue;
            }
            if seen.insert(path.to_path_buf()) {
                roots.push(path.to_path_buf());
            }
        }

        Self { roots }
    }

    /// The resource roots, in artifact order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// True if no artifact contributed a servable root.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
