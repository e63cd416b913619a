//! Runtime settings shared by the CLI and the HTTP server.
//!
//! Built once at startup by `infra::config` and passed down by value; no
//! other code reads the process environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::env::AmbientDefaults;

/// Default timeout for any external command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);
pub const DEFAULT_KUBECTL: &str = "kubectl";
pub const DEPLOY_SCRIPT_NAME: &str = "deploy.sh";

/// Immutable configuration for the action layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Ambient fallbacks for the helm-related parameters.
    pub ambient: AmbientDefaults,
    /// Program used for cluster queries.
    pub kubectl: String,
    /// Script run by `deploy`.
    pub deploy_script: PathBuf,
    /// Upper bound on any single external command.
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ambient: AmbientDefaults::default(),
            kubectl: DEFAULT_KUBECTL.to_string(),
            deploy_script: PathBuf::from(DEPLOY_SCRIPT_NAME),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
