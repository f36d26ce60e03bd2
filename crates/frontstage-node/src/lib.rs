//! Node task-runner adapter for frontstage.
//!
//! Implements the `TaskRunner` port by spawning the grunt or gulp binary
//! in the project's working directory, streaming its output through
//! `tracing`, and mapping the exit status onto the task error taxonomy.

#![deny(unsafe_code)]

mod command;
mod resolve;
mod runner;

pub use runner::NodeTaskRunner;
