//! `sandbox-deploy delete_user <username>` — delete the user-init release.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::CommandRunner;
use crate::commands::{DeleteUserArgs, report, report_failure};
use crate::domain::DeleteUserRequest;

/// Run `sandbox-deploy delete_user`.
///
/// # Errors
///
/// Returns an error only if rendering fails; invalid input and helm failures
/// exit with 1.
pub async fn run<R: CommandRunner>(app: &AppContext<R>, args: DeleteUserArgs) -> Result<ExitCode> {
    let request = match DeleteUserRequest::new(&args.username, args.helm) {
        Ok(request) => request,
        Err(err) => return report_failure(app, &err.into()),
    };
    report(app, app.actions.delete_user(&request).await)
}
