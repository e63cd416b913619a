//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Process errors ────────────────────────────────────────────────────────────

/// An external command did not complete successfully.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Non-zero exit. `output` is the combined stdout+stderr stream.
    #[error("{program} exited with {}", exit_display(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        output: String,
    },

    #[error("{program} timed out after {secs}s")]
    TimedOut { program: String, secs: u64 },
}

impl ProcessError {
    /// Output captured before the failure, if any.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } => Some(output),
            Self::TimedOut { .. } => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn exit_display(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

// ── Cluster state errors ──────────────────────────────────────────────────────

/// Cluster query output was malformed or violated an assumption about
/// sandbox state. Never recovered from.
#[derive(Debug, Error)]
pub enum ClusterStateError {
    #[error("cannot decode {what} list: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected kind {expected} but found {found} ({name})")]
    UnexpectedKind {
        expected: &'static str,
        found: String,
        name: String,
    },

    #[error("namespace {name} is in phase {phase}, expected Active")]
    NamespaceNotActive { name: String, phase: String },

    #[error("pod {pod}: invalid lastTransitionTime '{value}'")]
    BadTimestamp { pod: String, value: String },
}

// ── Request errors ────────────────────────────────────────────────────────────

/// Invalid action parameters, rejected before any process is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid {param} '{value}': must match ^[a-z0-9]([a-z0-9-]{{0,61}}[a-z0-9])?$")]
    InvalidValue { param: &'static str, value: String },
}
