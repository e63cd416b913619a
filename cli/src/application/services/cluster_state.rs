//! Application service — read-only cluster queries.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Query failures propagate unchanged; the caller decides how to report them.

use anyhow::Result;
use sandbox_common::types::PodStatus;

use crate::application::ports::CommandRunner;
use crate::domain::{EnvironmentOverrides, pod_statuses_from_pods, sandboxes_from_namespaces};

pub const NAMESPACES_QUERY: &[&str] = &["get", "namespaces", "--output=json"];
pub const PODS_QUERY: &[&str] = &["get", "pods", "--all-namespaces", "--output=json"];

/// List sandbox names in the order `kubectl` reports their namespaces.
///
/// # Errors
///
/// Returns the runner's error if the query fails, or `ClusterStateError` if
/// its output is malformed or a `user-` namespace is not `Active`.
pub async fn list_sandboxes(runner: &impl CommandRunner, kubectl: &str) -> Result<Vec<String>> {
    let output = runner
        .run(kubectl, NAMESPACES_QUERY, &EnvironmentOverrides::new())
        .await?;
    let sandboxes = sandboxes_from_namespaces(&output.output)?;
    tracing::debug!(count = sandboxes.len(), "listed sandboxes");
    Ok(sandboxes)
}

/// Summarize every user-app pod across all namespaces.
///
/// # Errors
///
/// Returns the runner's error if the query fails, or `ClusterStateError` if
/// its output is malformed.
pub async fn list_pod_statuses(
    runner: &impl CommandRunner,
    kubectl: &str,
) -> Result<Vec<PodStatus>> {
    let output = runner
        .run(kubectl, PODS_QUERY, &EnvironmentOverrides::new())
        .await?;
    let statuses = pod_statuses_from_pods(&output.output)?;
    tracing::debug!(count = statuses.len(), "listed pod statuses");
    Ok(statuses)
}
