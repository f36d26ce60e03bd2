//! Router construction from the server configuration.
//!
//! The provider-selected root is served at `/`, with the resolved
//! resource roots chained behind it as fallbacks. Each additional context
//! is nested at its context root, in configuration order. The free-form
//! property bag configures the serving behavior; unknown keys are ignored
//! with a debug log.

use std::collections::HashMap;
use std::path::Path;

use axum::Router;
use frontstage_core::{ServerConfig, ServerError};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Property keys the configurator understands.
const KNOWN_PROPERTIES: [&str; 3] = ["cors", "index", "precompressed"];

/// Build a `ServeDir` honoring the property bag.
fn make_serve_dir(dir: &Path, properties: &HashMap<String, String>) -> ServeDir {
    let mut serve = ServeDir::new(dir);

    if properties.get("index").map(String::as_str) == Some("false") {
        serve = serve.append_index_html_on_directories(false);
    }

    match properties.get("precompressed").map(String::as_str) {
        Some("gzip") => serve = serve.precompressed_gzip(),
        Some("br") => serve = serve.precompressed_br(),
        Some(other) => debug!(value = %other, "Ignoring unsupported precompressed value"),
        None => {}
    }

    serve
}

/// Normalize a context root into a mount path (`lib` → `/lib`).
fn normalize_mount(context_root: &str) -> Result<String, ServerError> {
    let trimmed = context_root.trim_matches('/');
    if trimmed.is_empty() {
        return Err(ServerError::Configuration(
            "Context root must not be empty or '/'".to_string(),
        ));
    }
    Ok(format!("/{trimmed}"))
}

/// Build the router for one invocation's server configuration.
pub(crate) fn build_router(config: &ServerConfig) -> Result<Router, ServerError> {
    let root = crate::provider::resolve_root_mount(config)?;
    let properties = config.properties();

    for key in properties.keys() {
        if !KNOWN_PROPERTIES.contains(&key.as_str()) {
            debug!(key = %key, "Ignoring unknown server property");
        }
    }

    let mut router = Router::new();
    for context in config.contexts() {
        let mount = normalize_mount(&context.context_root)?;
        debug!(mount = %mount, directory = %context.directory.display(), "Mounting context");
        router = router.nest_service(&mount, make_serve_dir(&context.directory, properties));
    }

    // Resource roots resolve behind the root mount, in artifact order.
    // Built innermost-first so the first root is consulted first.
    let view = config.resource_view();
    let mut fallback = Router::new();
    for dir in view.roots().iter().rev() {
        debug!(root = %dir.display(), "Adding resource root");
        fallback = Router::new().fallback_service(make_serve_dir(dir, properties).fallback(fallback));
    }

    router = router.fallback_service(make_serve_dir(&root, properties).fallback(fallback));

    if properties.get("cors").map(String::as_str) == Some("all") {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Ok(router.layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontstage_core::AdditionalContext;
    use tempfile::TempDir;

    #[test]
    fn normalize_mount_strips_slashes() {
        assert_eq!(normalize_mount("lib").unwrap(), "/lib");
        assert_eq!(normalize_mount("/lib/").unwrap(), "/lib");
        assert_eq!(normalize_mount("test/lib").unwrap(), "/test/lib");
    }

    #[test]
    fn normalize_mount_rejects_root() {
        assert!(normalize_mount("/").is_err());
        assert!(normalize_mount("").is_err());
    }

    #[test]
    fn build_router_accepts_contexts_and_properties() {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("lib");
        std::fs::create_dir_all(&lib).unwrap();

        let config = ServerConfig::new(dir.path())
            .with_contexts(vec![AdditionalContext::new("lib", &lib)])
            .with_property("cors", "all")
            .with_property("unused-key", "whatever");

        assert!(build_router(&config).is_ok());
    }

    #[test]
    fn build_router_rejects_empty_context_root() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::new(dir.path())
            .with_contexts(vec![AdditionalContext::new("/", dir.path())]);
        assert!(matches!(
            build_router(&config).unwrap_err(),
            ServerError::Configuration(_)
        ));
    }
}
