use serde::{Deserialize, Serialize};

/// Namespace prefix shared by every user sandbox.
pub const USER_NAMESPACE_PREFIX: &str = "user-";

/// Status of a single user-app pod, as reported by `pod_statuses` and
/// `GET /api/pod-statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    /// Namespace with the `user-` prefix stripped.
    pub user: String,
    /// Value of the pod's `app` label.
    pub app: String,
    /// Pod phase, e.g. `Running` or `Pending`.
    pub phase: String,
    /// Type of the most recently transitioned condition.
    /// `None` when the pod reports no conditions yet.
    pub status: Option<String>,
    pub last_transition_time: Option<String>,
    /// `true` if any condition reports `False`.
    pub error: bool,
    /// Messages of all `False` conditions, joined with `;`.
    pub messages: String,
}

/// Body of `POST /api/deploy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployBody {
    /// Full name of the user.
    pub name: String,
    /// GitHub username, used as the sandbox username.
    pub github: String,
    pub email: String,
}

/// Body of `POST /api/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBody {
    pub github: String,
}

/// Response of the mutating endpoints: the captured process output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBody {
    pub text: String,
}
