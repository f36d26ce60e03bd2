//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the lifecycle core expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No axum/process/filesystem implementation details in signatures
//! - Intent-based methods (start/stop/execute), not implementation-leaking

pub mod server_manager;
pub mod task_runner;

use std::process::ExitStatus;

use thiserror::Error;

pub use server_manager::{ServerHandle, ServerManager};
pub use task_runner::{RunnerKind, TaskRunner};

/// Errors from the embedded server manager.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured port is already bound by another process.
    #[error("Port {0} is already in use")]
    PortInUse(u16),

    /// Failed to start the server.
    #[error("Failed to start server: {0}")]
    StartFailed(String),

    /// Failed to stop the server.
    #[error("Failed to stop server: {0}")]
    StopFailed(String),

    /// The server is not running.
    #[error("Server not running: {0}")]
    NotRunning(String),

    /// Configuration error (bad context provider, missing content root).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors from the external task-runner layer.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The runner binary could not be located.
    #[error("Task runner '{runner}' not found: {hint}")]
    RunnerNotFound {
        /// Runner command name (grunt, gulp).
        runner: String,
        /// Actionable installation hint.
        hint: String,
    },

    /// The argument string could not be parsed into an argv.
    #[error("Invalid argument string: {0:?}")]
    InvalidArguments(String),

    /// The runner process could not be spawned.
    #[error("Failed to spawn task runner: {0}")]
    SpawnFailed(String),

    /// The runner ran and reported failure.
    #[error("Task failed with {status}")]
    TaskFailed {
        /// Exit status reported by the runner process.
        status: ExitStatus,
    },

    /// I/O error while driving the runner process.
    #[error("Task runner I/O error")]
    Io(#[from] std::io::Error),
}
