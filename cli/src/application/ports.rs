//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::future::Future;

use anyhow::Result;

use crate::domain::EnvironmentOverrides;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Output of a successful external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Combined stdout and stderr, in the order the child wrote them.
    pub output: Vec<u8>,
}

impl ProcessOutput {
    /// Lossy UTF-8 view of the captured output.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, layering `env` over the inherited
    /// environment, and capture combined output.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Failed` (carrying the captured output) on a
    /// non-zero exit, `ProcessError::TimedOut` if the child outlives the
    /// runner's timeout, or a spawn error.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        env: &EnvironmentOverrides,
    ) -> impl Future<Output = Result<ProcessOutput>> + Send;
}
