//! Optional project manifest.
//!
//! A `frontstage.json` in the working directory carries per-project
//! defaults so that invocations do not need every flag repeated. All
//! fields are optional; command-line flags win over manifest values.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use frontstage_core::AdditionalContext;
use serde::{Deserialize, Serialize};

/// Manifest file name looked up in the working directory.
pub const MANIFEST_FILE: &str = "frontstage.json";

/// Per-project defaults; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectManifest {
    /// Port for the embedded server.
    pub port: Option<u16>,
    /// Named context provider.
    pub context_provider: Option<String>,
    /// Additional contexts, relative directories resolved against the
    /// working directory.
    pub additional_contexts: Vec<AdditionalContext>,
    /// Free-form server properties.
    pub config: HashMap<String, String>,
    /// Resolved dependency artifact paths.
    pub artifacts: Vec<PathBuf>,
}

impl ProjectManifest {
    /// Load the manifest from `dir` if one exists.
    ///
    /// A missing file is fine (`Ok(None)`); an unreadable or malformed
    /// one is an error — a broken manifest should fail the build step,
    /// not be silently ignored.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(manifest))
    }
}
