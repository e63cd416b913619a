//! JSON API handlers.

use axum::Json;
use axum::extract::State;
use sandbox_common::types::{DeleteBody, DeployBody, PodStatus, TextBody};
use sandbox_deploy::application::CommandRunner;
use sandbox_deploy::domain::{ActionRequest, DeployRequest, RequestError};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/sandboxes`
pub async fn sandboxes<R: CommandRunner>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.actions.list_sandboxes().await?))
}

/// `GET /api/pod-statuses`
pub async fn pod_statuses<R: CommandRunner>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<PodStatus>>, ApiError> {
    Ok(Json(state.actions.list_pod_statuses().await?))
}

/// `POST /api/deploy` with `{name, github, email}`.
pub async fn deploy<R: CommandRunner>(
    State(state): State<AppState<R>>,
    Json(body): Json<DeployBody>,
) -> Result<Json<TextBody>, ApiError> {
    let request = deploy_request(&body)?;
    tracing::info!(username = request.username.as_deref().unwrap_or_default(), "deploy requested");
    let output = state.actions.deploy(&request).await?;
    Ok(Json(TextBody {
        text: output.text(),
    }))
}

/// `POST /api/delete` with `{github}`: removes the user-init release and
/// then the default chart release.
pub async fn delete<R: CommandRunner>(
    State(state): State<AppState<R>>,
    Json(body): Json<DeleteBody>,
) -> Result<Json<TextBody>, ApiError> {
    tracing::info!(username = %body.github, "delete requested");
    let output = state.actions.delete(&body.github).await?;
    Ok(Json(TextBody {
        text: output.text(),
    }))
}

// `github` is the release-name fragment, held to the same rule `delete`
// applies so that every deployed user can be removed again.
fn deploy_request(body: &DeployBody) -> Result<DeployRequest, RequestError> {
    let action = ActionRequest::from_pairs([
        ("username", body.github.as_str()),
        ("email", body.email.as_str()),
        ("fullname", body.name.as_str()),
    ])?;
    DeployRequest::for_user(&action)
}
