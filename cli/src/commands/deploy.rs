//! `sandbox-deploy deploy` — create or update a user's sandbox.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::CommandRunner;
use crate::commands::{DeployArgs, report};
use crate::domain::{DeployRequest, HelmOptions};

impl From<DeployArgs> for DeployRequest {
    fn from(args: DeployArgs) -> Self {
        Self {
            username: args.username,
            email: args.email,
            fullname: args.fullname,
            options: HelmOptions {
                platform_env: args.platform_env,
                chart_env_config: args.chart_env_config,
                helm: args.helm,
            },
        }
    }
}

/// Run `sandbox-deploy deploy`.
///
/// # Errors
///
/// Returns an error only if rendering fails; script failures exit with 1.
pub async fn run<R: CommandRunner>(app: &AppContext<R>, args: DeployArgs) -> Result<ExitCode> {
    let request = DeployRequest::from(args);
    report(app, app.actions.deploy(&request).await)
}
