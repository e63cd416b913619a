//! sandbox-deploy HTTP server entry point.
//!
//! Initialises tracing, loads configuration from `SANDBOX_DEPLOY_*`
//! environment variables plus the shared sandbox settings, and serves the
//! API until interrupted.

use anyhow::{Context, Result};
use sandbox_common::DeployServerConfig;
use sandbox_deploy::application::SandboxActions;
use sandbox_deploy::infra::{TokioCommandRunner, load_settings};
use sandbox_deploy_server::{AppState, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config: DeployServerConfig = envy::prefixed("SANDBOX_DEPLOY_")
        .from_env()
        .context(
            "failed to load config from SANDBOX_DEPLOY_* env vars \
             (SANDBOX_DEPLOY_USERNAME is required, but may be empty)",
        )?;
    let settings = load_settings()?;

    if config.auth_disabled() {
        tracing::warn!(
            "SANDBOX_DEPLOY_USERNAME is empty: HTTP basic auth is DISABLED, every request is allowed"
        );
    }
    tracing::info!(
        listen_addr = %config.listen_addr,
        kubectl = %settings.kubectl,
        deploy_script = %settings.deploy_script.display(),
        timeout_secs = settings.timeout.as_secs(),
        "configuration loaded",
    );

    let addr = config.listen_addr;
    let runner = TokioCommandRunner::new(settings.timeout);
    let app = router(AppState::new(SandboxActions::new(runner, settings), config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "sandbox-deploy-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("sandbox-deploy-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
