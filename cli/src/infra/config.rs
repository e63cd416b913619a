//! Loads `Settings` from the process environment.
//!
//! This is the only place the ambient environment is read. Each field of
//! `EnvSettings` maps to the upper-cased variable of the same name:
//!   - `SANDBOX`                 ambient `PLATFORM_ENV` fallback
//!   - `CHART_ENV_CONFIG`        ambient `CHART_ENV_CONFIG` fallback
//!   - `HELM`                    ambient `HELM` fallback
//!   - `KUBECTL`                 cluster query program (default `kubectl`)
//!   - `SANDBOX_DEPLOY_SCRIPT`   deploy script (default `deploy.sh` beside the executable)
//!   - `SANDBOX_DEPLOY_TIMEOUT`  per-command timeout in seconds (default 600)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::config::{DEFAULT_KUBECTL, DEFAULT_TIMEOUT, DEPLOY_SCRIPT_NAME, Settings};
use crate::domain::env::AmbientDefaults;

#[derive(Debug, Deserialize)]
struct EnvSettings {
    sandbox: Option<String>,
    chart_env_config: Option<String>,
    helm: Option<String>,
    kubectl: Option<String>,
    sandbox_deploy_script: Option<PathBuf>,
    sandbox_deploy_timeout: Option<u64>,
}

/// Read settings from the current process environment.
///
/// # Errors
///
/// Returns an error if a variable has the wrong type (e.g. a non-numeric
/// `SANDBOX_DEPLOY_TIMEOUT`).
pub fn load_settings() -> Result<Settings> {
    let raw: EnvSettings = envy::from_env().context("invalid sandbox-deploy environment")?;
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    Ok(resolve(raw, exe_dir.as_deref()))
}

/// Build settings from explicit variables instead of the process environment.
///
/// # Errors
///
/// Returns an error if a variable has the wrong type.
pub fn settings_from_vars<I>(vars: I, exe_dir: Option<&Path>) -> Result<Settings>
where
    I: IntoIterator<Item = (String, String)>,
{
    let raw: EnvSettings = envy::from_iter(vars).context("invalid sandbox-deploy environment")?;
    Ok(resolve(raw, exe_dir))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn resolve(raw: EnvSettings, exe_dir: Option<&Path>) -> Settings {
    let deploy_script = raw
        .sandbox_deploy_script
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| match exe_dir {
            Some(dir) => dir.join(DEPLOY_SCRIPT_NAME),
            None => PathBuf::from(DEPLOY_SCRIPT_NAME),
        });

    Settings {
        ambient: AmbientDefaults {
            platform_env: non_empty(raw.sandbox),
            chart_env_config: non_empty(raw.chart_env_config),
            helm: non_empty(raw.helm),
        },
        kubectl: non_empty(raw.kubectl).unwrap_or_else(|| DEFAULT_KUBECTL.to_string()),
        deploy_script,
        timeout: raw
            .sandbox_deploy_timeout
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
    }
}
