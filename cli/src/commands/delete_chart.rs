//! `sandbox-deploy delete_chart <username> [chart]` — delete an application release.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::CommandRunner;
use crate::commands::{DeleteChartArgs, report, report_failure};
use crate::domain::DeleteChartRequest;

/// Run `sandbox-deploy delete_chart`.
///
/// # Errors
///
/// Returns an error only if rendering fails; invalid input and helm failures
/// exit with 1.
pub async fn run<R: CommandRunner>(
    app: &AppContext<R>,
    args: DeleteChartArgs,
) -> Result<ExitCode> {
    let request = match DeleteChartRequest::new(&args.username, Some(&args.chart), args.helm) {
        Ok(request) => request,
        Err(err) => return report_failure(app, &err.into()),
    };
    report(app, app.actions.delete_chart(&request).await)
}
