//! sandbox-deploy - Deploy and manage per-user sandboxes on Kubernetes

use std::process::ExitCode;

use clap::Parser;
use sandbox_deploy::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    sandbox_deploy::infra::logging::init("warn");
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}
