//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together:
//! flags and the optional project manifest become an explicit
//! `ServerConfig` + `TaskInvocation`, the axum server manager and the
//! Node runner are constructed, and the invoker sequences the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use frontstage_core::{
    AdditionalContext, Invoker, RunnerKind, ServerConfig, TaskInvocation, DEFAULT_SERVER_PORT,
};
use frontstage_node::NodeTaskRunner;
use frontstage_server::HttpServerManager;
use tracing::debug;

use crate::commands::TaskArgs;
use crate::manifest::ProjectManifest;

/// Everything needed for one invocation, fully resolved.
#[derive(Debug)]
pub struct InvocationPlan {
    /// Embedded server configuration.
    pub server: ServerConfig,
    /// Task invocation handed to the runner.
    pub invocation: TaskInvocation,
}

/// Split a `KEY=VALUE` flag value.
fn parse_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("Expected KEY=VALUE, got '{raw}'"),
    }
}

/// Resolve a possibly-relative path against the working directory.
fn resolve_against(working_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}

/// Build the invocation plan from flags and the optional manifest.
///
/// Flags win over manifest values; repeatable flags replace (not extend)
/// their manifest counterpart so a command line fully describes what ran.
pub fn plan(args: &TaskArgs) -> Result<InvocationPlan> {
    let working_dir = match &args.working_directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let manifest = ProjectManifest::load(&working_dir)?.unwrap_or_default();

    let port = args
        .port
        .or(manifest.port)
        .unwrap_or(DEFAULT_SERVER_PORT);

    let context_provider = args
        .context_provider
        .clone()
        .or(manifest.context_provider);

    let contexts = if args.contexts.is_empty() {
        manifest.additional_contexts.clone()
    } else {
        args.contexts
            .iter()
            .map(|raw| {
                let (root, dir) = parse_pair(raw)?;
                Ok(AdditionalContext::new(root, dir))
            })
            .collect::<Result<Vec<_>>>()?
    };
    let contexts = contexts
        .into_iter()
        .map(|c| AdditionalContext::new(c.context_root, resolve_against(&working_dir, &c.directory)))
        .collect();

    let artifacts = if args.artifacts.is_empty() {
        manifest.artifacts.clone()
    } else {
        args.artifacts.clone()
    };
    let artifacts = artifacts
        .iter()
        .map(|p| resolve_against(&working_dir, p))
        .collect();

    let mut properties = manifest.config.clone();
    for raw in &args.config {
        let (key, value) = parse_pair(raw)?;
        properties.insert(key.to_string(), value.to_string());
    }

    let mut server = ServerConfig::new(&working_dir)
        .with_port(port)
        .with_contexts(contexts)
        .with_artifacts(artifacts);
    if let Some(provider) = context_provider {
        server = server.with_context_provider(provider);
    }
    server.properties = properties;

    let invocation = TaskInvocation::new(working_dir).with_arguments(args.arguments.clone());

    Ok(InvocationPlan { server, invocation })
}

/// Run one task invocation end to end.
///
/// Startup and task failures propagate (non-zero exit); stop failures
/// were already contained as warnings inside the invoker.
pub async fn run(kind: RunnerKind, args: &TaskArgs) -> Result<()> {
    let plan = plan(args)?;
    debug!(
        port = plan.server.port,
        working_dir = %plan.invocation.working_dir.display(),
        arguments = %plan.invocation.arguments,
        "Resolved invocation plan"
    );

    let manager = Arc::new(HttpServerManager::new(plan.server));
    let invoker = Invoker::new(manager);
    let runner = NodeTaskRunner::new(kind);

    invoker
        .run(&runner, &plan.invocation)
        .await
        .with_context(|| format!("{kind} invocation failed"))?;

    Ok(())
}
