//! Action parameters: the canonical parameter set, the `ActionRequest`
//! mapping, and the closed per-action request types built from it.
//!
//! Pure functions only — no I/O, no async, no environment access.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::RequestError;

/// Chart deployed for every user unless another is named.
pub const DEFAULT_CHART: &str = "rstudio";

static RELEASE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").expect("valid regex")
});

// ── Parameters ────────────────────────────────────────────────────────────────

/// Canonical parameter names accepted by any action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Param {
    Username,
    Email,
    Fullname,
    PlatformEnv,
    ChartEnvConfig,
    Helm,
    Chart,
}

impl Param {
    pub const ALL: [Param; 7] = [
        Param::Username,
        Param::Email,
        Param::Fullname,
        Param::PlatformEnv,
        Param::ChartEnvConfig,
        Param::Helm,
        Param::Chart,
    ];

    /// Parameter name as written on the command line, e.g. `platform-env`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Param::Username => "username",
            Param::Email => "email",
            Param::Fullname => "fullname",
            Param::PlatformEnv => "platform-env",
            Param::ChartEnvConfig => "chart-env-config",
            Param::Helm => "helm",
            Param::Chart => "chart",
        }
    }

    /// Environment variable carrying this parameter, e.g. `PLATFORM_ENV`.
    #[must_use]
    pub fn env_var(self) -> String {
        env_var_name(self.key())
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Param {
    type Err = RequestError;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Param::ALL
            .into_iter()
            .find(|p| p.key() == normalized)
            .ok_or_else(|| RequestError::UnknownParameter(s.to_string()))
    }
}

/// Derive an environment variable name from a parameter name.
///
/// `chart-env-config` → `CHART_ENV_CONFIG`.
#[must_use]
pub fn env_var_name(param: &str) -> String {
    param.to_ascii_uppercase().replace('-', "_")
}

// ── ActionRequest ─────────────────────────────────────────────────────────────

/// Parameter values for one action invocation.
///
/// Empty values are never stored, so an absent key and an empty string
/// behave identically downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRequest {
    values: BTreeMap<Param, String>,
}

impl ActionRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `param`, ignoring empty values.
    #[must_use]
    pub fn with(mut self, param: Param, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.values.insert(param, value);
        }
        self
    }

    /// Set `param` when `value` is present and non-empty.
    #[must_use]
    pub fn with_opt(self, param: Param, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with(param, v),
            None => self,
        }
    }

    /// Build from loosely-keyed pairs, canonicalizing each key.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::UnknownParameter` for a key outside the
    /// canonical set.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |req, (key, value)| {
                Ok(req.with(key.parse()?, value))
            })
    }

    #[must_use]
    pub fn get(&self, param: Param) -> Option<&str> {
        self.values.get(&param).map(String::as_str)
    }

    /// # Errors
    ///
    /// Returns `RequestError::MissingParameter` if `param` is absent.
    pub fn require(&self, param: Param) -> Result<&str, RequestError> {
        self.get(param)
            .ok_or(RequestError::MissingParameter(param.key()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Param, &str)> {
        self.values.iter().map(|(p, v)| (*p, v.as_str()))
    }
}

// ── Validated fragments ───────────────────────────────────────────────────────

/// A value safe to embed in a Helm release name.
fn release_fragment(param: Param, value: &str) -> Result<String, RequestError> {
    if RELEASE_FRAGMENT.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(RequestError::InvalidValue {
            param: param.key(),
            value: value.to_string(),
        })
    }
}

// ── Typed requests ────────────────────────────────────────────────────────────

/// Overrides for the tooling used by the deploy script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelmOptions {
    pub platform_env: Option<String>,
    pub chart_env_config: Option<String>,
    pub helm: Option<String>,
}

/// Create or update a user's sandbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub fullname: Option<String>,
    pub options: HelmOptions,
}

impl From<&DeployRequest> for ActionRequest {
    fn from(req: &DeployRequest) -> Self {
        ActionRequest::new()
            .with_opt(Param::Username, req.username.as_deref())
            .with_opt(Param::Email, req.email.as_deref())
            .with_opt(Param::Fullname, req.fullname.as_deref())
            .with_opt(Param::PlatformEnv, req.options.platform_env.as_deref())
            .with_opt(Param::ChartEnvConfig, req.options.chart_env_config.as_deref())
            .with_opt(Param::Helm, req.options.helm.as_deref())
    }
}

impl DeployRequest {
    /// Deploy request for a named user: `username` is required and must form
    /// a valid release name, so the same user can later be deleted.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::MissingParameter` when `username` is absent, or
    /// `RequestError::InvalidValue` when it cannot form a release name.
    pub fn for_user(req: &ActionRequest) -> Result<Self, RequestError> {
        let username = release_fragment(Param::Username, req.require(Param::Username)?)?;
        Ok(Self {
            username: Some(username),
            email: req.get(Param::Email).map(str::to_string),
            fullname: req.get(Param::Fullname).map(str::to_string),
            options: HelmOptions {
                platform_env: req.get(Param::PlatformEnv).map(str::to_string),
                chart_env_config: req.get(Param::ChartEnvConfig).map(str::to_string),
                helm: req.get(Param::Helm).map(str::to_string),
            },
        })
    }
}

/// Remove the `init-user-<username>` release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteUserRequest {
    username: String,
    helm: Option<String>,
}

impl DeleteUserRequest {
    /// # Errors
    ///
    /// Returns `RequestError::MissingParameter` when `username` is empty, or
    /// `RequestError::InvalidValue` when it cannot form a release name.
    pub fn new(username: &str, helm: Option<String>) -> Result<Self, RequestError> {
        let req = ActionRequest::new()
            .with(Param::Username, username)
            .with_opt(Param::Helm, helm.as_deref());
        Self::try_from(&req)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Helm release removed by this request.
    #[must_use]
    pub fn release(&self) -> String {
        format!("init-user-{}", self.username)
    }
}

impl TryFrom<&ActionRequest> for DeleteUserRequest {
    type Error = RequestError;

    fn try_from(req: &ActionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: release_fragment(Param::Username, req.require(Param::Username)?)?,
            helm: req.get(Param::Helm).map(str::to_string),
        })
    }
}

impl From<&DeleteUserRequest> for ActionRequest {
    fn from(req: &DeleteUserRequest) -> Self {
        ActionRequest::new()
            .with(Param::Username, req.username.as_str())
            .with_opt(Param::Helm, req.helm.as_deref())
    }
}

/// Remove the `<username>-<chart>` release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteChartRequest {
    username: String,
    chart: String,
    helm: Option<String>,
}

impl DeleteChartRequest {
    /// `chart` defaults to [`DEFAULT_CHART`] when `None` or empty.
    ///
    /// # Errors
    ///
    /// Returns a `RequestError` when `username` is empty or either value
    /// cannot form a release name.
    pub fn new(
        username: &str,
        chart: Option<&str>,
        helm: Option<String>,
    ) -> Result<Self, RequestError> {
        let req = ActionRequest::new()
            .with(Param::Username, username)
            .with_opt(Param::Chart, chart)
            .with_opt(Param::Helm, helm.as_deref());
        Self::try_from(&req)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn chart(&self) -> &str {
        &self.chart
    }

    /// Helm release removed by this request.
    #[must_use]
    pub fn release(&self) -> String {
        format!("{}-{}", self.username, self.chart)
    }
}

impl TryFrom<&ActionRequest> for DeleteChartRequest {
    type Error = RequestError;

    fn try_from(req: &ActionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: release_fragment(Param::Username, req.require(Param::Username)?)?,
            chart: release_fragment(
                Param::Chart,
                req.get(Param::Chart).unwrap_or(DEFAULT_CHART),
            )?,
            helm: req.get(Param::Helm).map(str::to_string),
        })
    }
}

impl From<&DeleteChartRequest> for ActionRequest {
    fn from(req: &DeleteChartRequest) -> Self {
        ActionRequest::new()
            .with(Param::Username, req.username.as_str())
            .with(Param::Chart, req.chart.as_str())
            .with_opt(Param::Helm, req.helm.as_deref())
    }
}
