//! Configuration surface for one invocation.
//!
//! These are pure domain types with no infrastructure dependencies. The
//! host build step constructs them explicitly and passes them into the
//! composition root; nothing here is populated by reflection or global
//! state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::resources::ResourceView;

/// Default port for the embedded server.
pub const DEFAULT_SERVER_PORT: u16 = 8234;

/// An extra static mount point exposed by the embedded server.
///
/// Maps a URL path prefix (`context_root`) to a filesystem directory.
/// Immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalContext {
    /// URL path prefix the directory is served under, without leading slash
    /// (e.g. `lib` or `test/lib`).
    pub context_root: String,
    /// Directory to serve.
    pub directory: PathBuf,
}

impl AdditionalContext {
    /// Create a new context mount.
    pub fn new(context_root: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            context_root: context_root.into(),
            directory: directory.into(),
        }
    }
}

/// Configuration for the embedded server.
///
/// This is an intent-based configuration — it expresses what the caller
/// wants served, not how the server should be implemented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Project root directory; the server uses it to locate default content.
    pub basedir: PathBuf,
    /// Port to bind (must be free at start time).
    pub port: u16,
    /// Named context provider selecting the root mount layout
    /// (if None, the default provider serves `basedir` at `/`).
    pub context_provider: Option<String>,
    /// Additional contexts, served in configuration order.
    pub contexts: Vec<AdditionalContext>,
    /// Resolved dependency artifact paths contributed by the host build.
    /// Directories among them become servable resource roots.
    pub artifacts: Vec<PathBuf>,
    /// Free-form key/value properties, passed through to the server
    /// configurator unmodified.
    pub properties: HashMap<String, String>,
}

impl ServerConfig {
    /// Create a configuration with required fields and defaults.
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            port: DEFAULT_SERVER_PORT,
            context_provider: None,
            contexts: Vec::new(),
            artifacts: Vec::new(),
            properties: HashMap::new(),
        }
    }

    /// Set the port to bind.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the named context provider.
    #[must_use]
    pub fn with_context_provider(mut self, name: impl Into<String>) -> Self {
        self.context_provider = Some(name.into());
        self
    }

    /// Set the additional contexts.
    #[must_use]
    pub fn with_contexts(mut self, contexts: Vec<AdditionalContext>) -> Self {
        self.contexts = contexts;
        self
    }

    /// Set the resolved dependency artifact paths.
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: Vec<PathBuf>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Set a free-form property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The configured additional contexts, in order, as an owned copy.
    ///
    /// Callers get a snapshot; later mutation of the configuration does not
    /// affect a copy already handed out.
    pub fn contexts(&self) -> Vec<AdditionalContext> {
        self.contexts.clone()
    }

    /// The project root directory.
    pub fn basedir(&self) -> &PathBuf {
        &self.basedir
    }

    /// Build the servable resource view from the configured artifacts.
    pub fn resource_view(&self) -> ResourceView {
        ResourceView::from_artifacts(&self.artifacts)
    }

    /// The free-form property bag.
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }
}

/// One request to run a frontend task.
///
/// Stateless; constructed fresh per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInvocation {
    /// Free-form argument string passed verbatim to the runner.
    /// Empty means "run the default task with no extra arguments".
    pub arguments: String,
    /// Directory the runner executes in (usually the directory that
    /// contains package.json).
    pub working_dir: PathBuf,
}

impl TaskInvocation {
    /// Create an invocation for the default task in `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            arguments: String::new(),
            working_dir: working_dir.into(),
        }
    }

    /// Set the argument string.
    #[must_use]
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_standard_port() {
        let config = ServerConfig::new("/proj");
        assert_eq!(config.port, DEFAULT_SERVER_PORT);
        assert!(config.contexts.is_empty());
        assert!(config.context_provider.is_none());
    }

    #[test]
    fn contexts_returns_ordered_copy() {
        let mut config = ServerConfig::new("/proj").with_contexts(vec![
            AdditionalContext::new("lib", "/proj/src/main/lib"),
            AdditionalContext::new("test/lib", "/proj/src/test/lib"),
        ]);

        let snapshot = config.contexts();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].context_root, "lib");
        assert_eq!(snapshot[1].context_root, "test/lib");

        // Mutating the source afterwards must not affect the copy
        config.contexts.clear();
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn builder_sets_properties() {
        let config = ServerConfig::new("/proj")
            .with_port(9000)
            .with_context_provider("webapp")
            .with_property("cors", "all");

        assert_eq!(config.port, 9000);
        assert_eq!(config.context_provider.as_deref(), Some("webapp"));
        assert_eq!(config.properties().get("cors").map(String::as_str), Some("all"));
    }

    #[test]
    fn invocation_defaults_to_empty_arguments() {
        let invocation = TaskInvocation::new("/proj");
        assert_eq!(invocation.arguments, "");

        let invocation = invocation.with_arguments("build --prod");
        assert_eq!(invocation.arguments, "build --prod");
    }
}
