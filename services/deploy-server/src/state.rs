//! Shared handler state.

use std::sync::Arc;

use sandbox_common::DeployServerConfig;
use sandbox_deploy::application::{CommandRunner, SandboxActions};

/// State handed to every handler. Cheap to clone.
pub struct AppState<R: CommandRunner> {
    pub actions: Arc<SandboxActions<R>>,
    pub config: Arc<DeployServerConfig>,
}

impl<R: CommandRunner> AppState<R> {
    #[must_use]
    pub fn new(actions: SandboxActions<R>, config: DeployServerConfig) -> Self {
        Self {
            actions: Arc::new(actions),
            config: Arc::new(config),
        }
    }
}

// Derive would require `R: Clone`.
impl<R: CommandRunner> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            actions: Arc::clone(&self.actions),
            config: Arc::clone(&self.config),
        }
    }
}
