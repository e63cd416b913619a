//! Decoding of `kubectl ... --output=json` list objects into sandbox views.
//!
//! Pure functions only — bytes in, domain values out. Unexpected cluster
//! state is reported as `ClusterStateError` rather than filtered away.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use sandbox_common::types::{PodStatus, USER_NAMESPACE_PREFIX};
use serde::Deserialize;

use crate::domain::error::ClusterStateError;

const NAMESPACE_KIND: &str = "Namespace";
const ACTIVE_PHASE: &str = "Active";
const APP_LABEL: &str = "app";

// ── Wire shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct KubeList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct ObjectMeta {
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    labels: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct Namespace {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    status: NamespaceStatus,
}

#[derive(Debug, Default, Deserialize)]
struct NamespaceStatus {
    #[serde(default)]
    phase: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Pod {
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    status: PodState,
}

#[derive(Debug, Default, Deserialize)]
struct PodState {
    #[serde(default)]
    phase: String,
    #[serde(default)]
    conditions: Option<Vec<Condition>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Condition {
    #[serde(rename = "type")]
    kind: String,
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    last_transition_time: Option<String>,
}

// ── Namespaces ───────────────────────────────────────────────────────────────

/// Extract sandbox names from a namespace list, in input order.
///
/// # Errors
///
/// Returns `ClusterStateError` if the JSON is malformed, an item is not a
/// `Namespace`, or a `user-` namespace is not `Active`.
pub fn sandboxes_from_namespaces(json: &[u8]) -> Result<Vec<String>, ClusterStateError> {
    let list: KubeList<Namespace> =
        serde_json::from_slice(json).map_err(|source| ClusterStateError::Decode {
            what: "namespace",
            source,
        })?;

    let mut sandboxes = Vec::new();
    for item in list.items {
        if item.kind != NAMESPACE_KIND {
            return Err(ClusterStateError::UnexpectedKind {
                expected: NAMESPACE_KIND,
                found: item.kind,
                name: item.metadata.name,
            });
        }
        let Some(sandbox) = item.metadata.name.strip_prefix(USER_NAMESPACE_PREFIX) else {
            continue;
        };
        let phase = item.status.phase.as_deref().unwrap_or_default();
        if phase != ACTIVE_PHASE {
            return Err(ClusterStateError::NamespaceNotActive {
                phase: phase.to_string(),
                name: item.metadata.name.clone(),
            });
        }
        sandboxes.push(sandbox.to_string());
    }
    Ok(sandboxes)
}

// ── Pods ─────────────────────────────────────────────────────────────────────

/// Summarize user-app pods from an all-namespaces pod list, in input order.
///
/// Pods outside `user-` namespaces, and pods without an `app` label, are
/// skipped.
///
/// # Errors
///
/// Returns `ClusterStateError` if the JSON is malformed or a condition has
/// an unparseable `lastTransitionTime`.
pub fn pod_statuses_from_pods(json: &[u8]) -> Result<Vec<PodStatus>, ClusterStateError> {
    let list: KubeList<Pod> =
        serde_json::from_slice(json).map_err(|source| ClusterStateError::Decode {
            what: "pod",
            source,
        })?;

    let mut statuses = Vec::new();
    for pod in list.items {
        let Some(user) = pod
            .metadata
            .namespace
            .as_deref()
            .and_then(|ns| ns.strip_prefix(USER_NAMESPACE_PREFIX))
        else {
            continue;
        };
        let Some(app) = pod.metadata.labels.as_ref().and_then(|l| l.get(APP_LABEL)) else {
            continue;
        };
        statuses.push(summarize_pod(&pod, user, app)?);
    }
    Ok(statuses)
}

fn summarize_pod(pod: &Pod, user: &str, app: &str) -> Result<PodStatus, ClusterStateError> {
    let conditions = pod.status.conditions.as_deref().unwrap_or_default();
    let latest = latest_condition(&pod.metadata.name, conditions)?;

    let failing: Vec<&Condition> = conditions.iter().filter(|c| c.status == "False").collect();
    let messages = failing
        .iter()
        .map(|c| c.message.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(";");

    Ok(PodStatus {
        user: user.to_string(),
        app: app.to_string(),
        phase: pod.status.phase.clone(),
        status: latest.map(|c| c.kind.clone()),
        last_transition_time: latest.and_then(|c| c.last_transition_time.clone()),
        error: !failing.is_empty(),
        messages,
    })
}

/// Last condition after a stable ascending sort on transition time.
///
/// Missing timestamps sort first; equal timestamps keep input order.
fn latest_condition<'a>(
    pod: &str,
    conditions: &'a [Condition],
) -> Result<Option<&'a Condition>, ClusterStateError> {
    let mut keyed = conditions
        .iter()
        .map(|c| Ok((transition_time(pod, c)?, c)))
        .collect::<Result<Vec<_>, ClusterStateError>>()?;
    keyed.sort_by_key(|(time, _)| *time);
    Ok(keyed.last().map(|(_, c)| *c))
}

fn transition_time(
    pod: &str,
    condition: &Condition,
) -> Result<Option<DateTime<FixedOffset>>, ClusterStateError> {
    condition
        .last_transition_time
        .as_deref()
        .map(|value| {
            DateTime::parse_from_rfc3339(value).map_err(|_| ClusterStateError::BadTimestamp {
                pod: pod.to_string(),
                value: value.to_string(),
            })
        })
        .transpose()
}
