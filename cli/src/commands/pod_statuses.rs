//! `sandbox-deploy pod_statuses` — print the status of every user pod.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::CommandRunner;
use crate::commands::report_failure;

/// Run `sandbox-deploy pod_statuses`.
///
/// # Errors
///
/// Returns an error only if rendering fails; query failures exit with 1.
pub async fn run<R: CommandRunner>(app: &AppContext<R>) -> Result<ExitCode> {
    match app.actions.list_pod_statuses().await {
        Ok(statuses) => {
            app.renderer().render_pod_statuses(&statuses)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_failure(app, &err),
    }
}
