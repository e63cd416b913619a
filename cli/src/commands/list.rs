//! `sandbox-deploy list` — print the active sandboxes.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::CommandRunner;

/// Run `sandbox-deploy list`.
///
/// Failures are not reported here; `Cli::run` renders them.
///
/// # Errors
///
/// Returns an error if kubectl fails or its output cannot be decoded.
pub async fn run<R: CommandRunner>(app: &AppContext<R>) -> Result<ExitCode> {
    let sandboxes = app.actions.list_sandboxes().await?;
    app.renderer().render_sandboxes(&sandboxes)?;
    Ok(ExitCode::SUCCESS)
}
