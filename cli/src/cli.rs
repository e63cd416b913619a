//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags, renderer};
use crate::commands;
use crate::infra::load_settings;

/// Deploy and manage per-user sandboxes on Kubernetes
#[derive(Parser)]
#[command(
    name = "sandbox-deploy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::BoolishValueParser::new())]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create/update user and rstudio
    Deploy(commands::DeployArgs),

    /// Get a list of all the sandboxes
    List,

    /// Get the statuses of all user pods
    #[command(name = "pod_statuses")]
    PodStatuses,

    /// Delete a user's init release
    #[command(name = "delete_user")]
    DeleteUser(commands::DeleteUserArgs),

    /// Delete a user's application release
    #[command(name = "delete_chart")]
    DeleteChart(commands::DeleteChartArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// Failures, including unusable settings, are rendered in the selected
    /// output mode and turned into exit code 1.
    ///
    /// # Errors
    ///
    /// Returns an error only if rendering the failure itself fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        let flags = OutputFlags {
            no_color,
            quiet,
            json,
        };

        let settings = match load_settings() {
            Ok(settings) => settings,
            Err(err) => {
                let output = flags.output_context();
                return commands::render_failure(&renderer(flags.mode(), &output), &err);
            }
        };

        let app = AppContext::new(&flags, settings);
        let result = match command {
            Command::Deploy(args) => commands::deploy::run(&app, args).await,
            Command::List => commands::list::run(&app).await,
            Command::PodStatuses => commands::pod_statuses::run(&app).await,
            Command::DeleteUser(args) => commands::delete_user::run(&app, args).await,
            Command::DeleteChart(args) => commands::delete_chart::run(&app, args).await,
            Command::Version => {
                commands::version::run(&app.renderer());
                Ok(ExitCode::SUCCESS)
            }
        };
        result.or_else(|err| commands::report_failure(&app, &err))
    }
}
