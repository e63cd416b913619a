//! Projection of action parameters onto child-process environment variables.
//!
//! Precedence, highest first: explicit request value, ambient value captured
//! at startup, static default. Parameters that are neither set nor defaulted
//! produce no override, so the inherited environment passes through.

use std::collections::BTreeMap;

use crate::domain::request::{ActionRequest, Param};

/// Static fallback for `PLATFORM_ENV`.
pub const DEFAULT_PLATFORM_ENV: &str = "sandbox";
/// Static fallback for `CHART_ENV_CONFIG`.
pub const DEFAULT_CHART_ENV_CONFIG: &str = "../data-science-sandbox-infrastucture/chart-env-config";
/// Static fallback for `HELM`.
pub const DEFAULT_HELM: &str = "helm";

/// Parameters defaulted for the deploy script.
pub const DEPLOY_DEFAULTS: &[Param] = &[Param::PlatformEnv, Param::ChartEnvConfig, Param::Helm];
/// Parameters defaulted for direct helm invocations.
pub const HELM_DEFAULTS: &[Param] = &[Param::Helm];

/// Environment variable overrides for one child process.
pub type EnvironmentOverrides = BTreeMap<String, String>;

/// Ambient values snapshotted from the process environment at startup.
///
/// Empty strings are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientDefaults {
    /// From `SANDBOX`.
    pub platform_env: Option<String>,
    /// From `CHART_ENV_CONFIG`.
    pub chart_env_config: Option<String>,
    /// From `HELM`.
    pub helm: Option<String>,
}

impl AmbientDefaults {
    fn get(&self, param: Param) -> Option<&str> {
        let value = match param {
            Param::PlatformEnv => self.platform_env.as_deref(),
            Param::ChartEnvConfig => self.chart_env_config.as_deref(),
            Param::Helm => self.helm.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }
}

fn static_default(param: Param) -> Option<&'static str> {
    match param {
        Param::PlatformEnv => Some(DEFAULT_PLATFORM_ENV),
        Param::ChartEnvConfig => Some(DEFAULT_CHART_ENV_CONFIG),
        Param::Helm => Some(DEFAULT_HELM),
        _ => None,
    }
}

/// Builds `EnvironmentOverrides` from requests.
#[derive(Debug, Clone, Default)]
pub struct EnvProjector {
    ambient: AmbientDefaults,
}

impl EnvProjector {
    #[must_use]
    pub fn new(ambient: AmbientDefaults) -> Self {
        Self { ambient }
    }

    /// Resolve a single parameter: request, then ambient, then static default.
    #[must_use]
    pub fn resolve<'a>(&'a self, request: &'a ActionRequest, param: Param) -> Option<&'a str> {
        request
            .get(param)
            .or_else(|| self.ambient.get(param))
            .or_else(|| static_default(param))
    }

    /// Project every request value plus the `defaulted` parameters.
    #[must_use]
    pub fn project(&self, request: &ActionRequest, defaulted: &[Param]) -> EnvironmentOverrides {
        let mut env: EnvironmentOverrides = request
            .iter()
            .map(|(param, value)| (param.env_var(), value.to_string()))
            .collect();
        for &param in defaulted {
            if let Some(value) = self.resolve(request, param) {
                env.entry(param.env_var()).or_insert_with(|| value.to_string());
            }
        }
        env
    }
}
