//! Command implementations

pub mod delete_chart;
pub mod delete_user;
pub mod deploy;
pub mod list;
pub mod pod_statuses;
pub mod version;

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::{CommandRunner, ProcessOutput};
use crate::domain::ProcessError;
use crate::output::Renderer;

/// Arguments for the deploy command.
///
/// Any value left unset falls back to the variable already present in the
/// environment the script inherits.
#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// Username of the sandbox owner
    #[arg(long, env = "USERNAME")]
    pub username: Option<String>,

    /// Email address of the sandbox owner
    #[arg(long, env = "EMAIL")]
    pub email: Option<String>,

    /// Full name of the sandbox owner
    #[arg(long, env = "FULLNAME")]
    pub fullname: Option<String>,

    /// Platform environment (defaults to $SANDBOX, then "sandbox")
    #[arg(long)]
    pub platform_env: Option<String>,

    /// Chart environment config directory
    #[arg(long)]
    pub chart_env_config: Option<String>,

    /// Helm executable
    #[arg(long)]
    pub helm: Option<String>,
}

/// Arguments for the `delete_user` command.
#[derive(Args, Debug)]
pub struct DeleteUserArgs {
    /// Username whose init release is deleted
    pub username: String,

    /// Helm executable
    #[arg(long)]
    pub helm: Option<String>,
}

/// Arguments for the `delete_chart` command.
#[derive(Args, Debug)]
pub struct DeleteChartArgs {
    /// Username owning the release
    pub username: String,

    /// Chart name
    #[arg(default_value = crate::domain::request::DEFAULT_CHART)]
    pub chart: String,

    /// Helm executable
    #[arg(long)]
    pub helm: Option<String>,
}

/// Render the outcome of an external command.
///
/// Success prints the captured output verbatim. Failure is reported and turned
/// into a non-zero exit code instead of an error.
///
/// # Errors
///
/// Returns an error only if rendering itself fails.
pub(crate) fn report<R: CommandRunner>(
    app: &AppContext<R>,
    result: Result<ProcessOutput>,
) -> Result<ExitCode> {
    match result {
        Ok(out) => {
            app.renderer().render_process_output(&out.text())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_failure(app, &err),
    }
}

/// Report a failed operation and return exit code 1.
///
/// When the failure came from a child process, its captured output is shown
/// before the `ERROR:` line.
///
/// # Errors
///
/// Returns an error only if rendering itself fails.
pub(crate) fn report_failure<R: CommandRunner>(
    app: &AppContext<R>,
    err: &anyhow::Error,
) -> Result<ExitCode> {
    render_failure(&app.renderer(), err)
}

/// [`report_failure`] for callers that have a renderer but no context yet.
///
/// # Errors
///
/// Returns an error only if rendering itself fails.
pub(crate) fn render_failure(renderer: &Renderer<'_>, err: &anyhow::Error) -> Result<ExitCode> {
    tracing::debug!(error = ?err, "command failed");
    let output = err
        .downcast_ref::<ProcessError>()
        .and_then(ProcessError::output);
    renderer.render_failure(&format!("{err:#}"), output)?;
    Ok(ExitCode::FAILURE)
}
