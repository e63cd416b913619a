//! Application service — the sandbox operations shared by the CLI and the
//! HTTP server.
//!
//! Each operation projects its request onto environment overrides, runs
//! exactly one external command through the injected `CommandRunner`, and
//! returns the captured output. `delete` is the exception: it runs two
//! commands in sequence and does not roll back the first if the second fails.

use anyhow::Result;
use sandbox_common::types::PodStatus;

use crate::application::ports::{CommandRunner, ProcessOutput};
use crate::application::services::cluster_state;
use crate::domain::env::{DEFAULT_HELM, DEPLOY_DEFAULTS, HELM_DEFAULTS};
use crate::domain::{
    ActionRequest, DeleteChartRequest, DeleteUserRequest, DeployRequest, EnvProjector, Param,
    Settings,
};

/// Sandbox operations bound to a runner and startup settings.
pub struct SandboxActions<R: CommandRunner> {
    runner: R,
    projector: EnvProjector,
    settings: Settings,
}

impl<R: CommandRunner> SandboxActions<R> {
    #[must_use]
    pub fn new(runner: R, settings: Settings) -> Self {
        Self {
            runner,
            projector: EnvProjector::new(settings.ambient.clone()),
            settings,
        }
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Create or update a user's sandbox by running the deploy script.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if the script fails or times out.
    pub async fn deploy(&self, request: &DeployRequest) -> Result<ProcessOutput> {
        let action = ActionRequest::from(request);
        let env = self.projector.project(&action, DEPLOY_DEFAULTS);
        let script = self.settings.deploy_script.to_string_lossy();
        tracing::info!(
            username = action.get(Param::Username).unwrap_or_default(),
            script = %script,
            "deploying sandbox"
        );
        self.runner.run(&script, &[], &env).await
    }

    /// Delete the user-init release `init-user-<username>`.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if helm fails or times out.
    pub async fn delete_user(&self, request: &DeleteUserRequest) -> Result<ProcessOutput> {
        self.helm_delete(&ActionRequest::from(request), &request.release())
            .await
    }

    /// Delete the application release `<username>-<chart>`.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if helm fails or times out.
    pub async fn delete_chart(&self, request: &DeleteChartRequest) -> Result<ProcessOutput> {
        self.helm_delete(&ActionRequest::from(request), &request.release())
            .await
    }

    /// Delete both the user-init release and the default chart release.
    ///
    /// Both requests are validated before anything runs. If the chart delete
    /// fails, the user-init release stays deleted.
    ///
    /// # Errors
    ///
    /// Returns a `RequestError` for an invalid username, or the first
    /// runner error.
    pub async fn delete(&self, username: &str) -> Result<ProcessOutput> {
        let user = DeleteUserRequest::new(username, None)?;
        let chart = DeleteChartRequest::new(username, None, None)?;

        let mut combined = self.delete_user(&user).await?;
        tracing::info!(release = %user.release(), "user release deleted");
        let chart_output = self.delete_chart(&chart).await?;
        combined.output.extend_from_slice(&chart_output.output);
        Ok(combined)
    }

    /// # Errors
    ///
    /// See [`cluster_state::list_sandboxes`].
    pub async fn list_sandboxes(&self) -> Result<Vec<String>> {
        cluster_state::list_sandboxes(&self.runner, &self.settings.kubectl).await
    }

    /// # Errors
    ///
    /// See [`cluster_state::list_pod_statuses`].
    pub async fn list_pod_statuses(&self) -> Result<Vec<PodStatus>> {
        cluster_state::list_pod_statuses(&self.runner, &self.settings.kubectl).await
    }

    async fn helm_delete(&self, action: &ActionRequest, release: &str) -> Result<ProcessOutput> {
        let env = self.projector.project(action, HELM_DEFAULTS);
        let helm = self
            .projector
            .resolve(action, Param::Helm)
            .unwrap_or(DEFAULT_HELM);
        tracing::info!(release, helm, "deleting helm release");
        self.runner
            .run(helm, &["delete", release, "--purge"], &env)
            .await
    }
}
