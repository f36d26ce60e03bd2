//! Task runner trait definition.
//!
//! One operation per runner kind: execute a task to completion. The two
//! supported kinds differ only in which binary they bind to; everything
//! else about an invocation is shared.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TaskError;
use crate::config::TaskInvocation;

/// Supported frontend task-runner kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerKind {
    /// The grunt task runner.
    Grunt,
    /// The gulp task runner.
    Gulp,
}

impl RunnerKind {
    /// Command name of the runner binary.
    pub const fn command(self) -> &'static str {
        match self {
            Self::Grunt => "grunt",
            Self::Gulp => "gulp",
        }
    }
}

impl fmt::Display for RunnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// External frontend task runner.
///
/// The contract the lifecycle core requires: run one task to completion,
/// reporting failure through `TaskError`. Blocking, no timeout, no
/// cancellation — the invocation runs to natural completion.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    /// Execute the task described by `invocation`, passing its argument
    /// string through verbatim.
    async fn execute(&self, invocation: &TaskInvocation) -> Result<(), TaskError>;
}
