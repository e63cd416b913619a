use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};

/// HTTP server configuration, read from `SANDBOX_DEPLOY_*` variables.
#[derive(Debug, Deserialize)]
pub struct DeployServerConfig {
    /// Basic-auth principal. Required, but may be empty: an empty username
    /// disables authentication entirely.
    pub username: String,

    /// Basic-auth password (default: empty).
    #[serde(default)]
    pub password: String,

    /// Listen address (default: 0.0.0.0:8000)
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8000))
}

impl DeployServerConfig {
    /// Whether requests bypass Basic auth (local testing only).
    #[must_use]
    pub fn auth_disabled(&self) -> bool {
        self.username.is_empty()
    }
}
