//! Router fixtures for handler tests.

#![allow(clippy::unwrap_used)]

use axum::Router;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sandbox_common::DeployServerConfig;
use sandbox_deploy::application::SandboxActions;
use sandbox_deploy::domain::Settings;
use sandbox_deploy::testing::{Call, RecordingRunner};

use crate::{AppState, router};

/// Handle on the runner inside a router's state.
pub struct Recorded(AppState<RecordingRunner>);

impl Recorded {
    pub fn calls(&self) -> Vec<Call> {
        self.0.actions.runner().calls()
    }
}

fn build(runner: RecordingRunner, username: &str) -> (Router, Recorded) {
    let config = DeployServerConfig {
        username: username.to_string(),
        password: "s3cret".to_string(),
        listen_addr: "127.0.0.1:0".parse().unwrap(),
    };
    let state = AppState::new(SandboxActions::new(runner, Settings::default()), config);
    (router(state.clone()), Recorded(state))
}

/// Router requiring `admin` / `s3cret`.
pub fn protected_router(runner: RecordingRunner) -> (Router, Recorded) {
    build(runner, "admin")
}

/// Router with authentication disabled.
pub fn open_router(runner: RecordingRunner) -> (Router, Recorded) {
    build(runner, "")
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
