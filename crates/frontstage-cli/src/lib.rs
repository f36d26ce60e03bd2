//! CLI crate for frontstage.
//!
//! `commands` defines the clap surface, `manifest` the optional
//! `frontstage.json` project file, and `bootstrap` the composition root
//! that wires configuration into the adapters and runs one invocation.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod manifest;

pub use commands::{Cli, Commands, TaskArgs};
pub use manifest::ProjectManifest;
