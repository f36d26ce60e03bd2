//! Core domain types and invocation lifecycle for frontstage.
//!
//! This crate owns the configuration surface, the port traits that
//! infrastructure adapters implement, and the `Invoker` service that
//! sequences one invocation: start server, run task, stop server.

#![deny(unsafe_code)]

pub mod config;
pub mod invoker;
pub mod ports;
pub mod resources;

// Re-export commonly used types for convenience
pub use config::{AdditionalContext, ServerConfig, TaskInvocation, DEFAULT_SERVER_PORT};
pub use invoker::{InvocationError, Invoker, LifecycleState};
pub use ports::{
    RunnerKind, ServerError, ServerHandle, ServerManager, TaskError, TaskRunner,
};
pub use resources::ResourceView;
