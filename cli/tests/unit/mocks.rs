//! Shared mock infrastructure for unit tests.
//!
//! Builds actions and contexts around the crate's `RecordingRunner`, plus
//! kubectl fixtures.

use sandbox_deploy::app::{AppContext, OutputFlags};
use sandbox_deploy::application::SandboxActions;
use sandbox_deploy::domain::Settings;
use sandbox_deploy::testing::RecordingRunner;

// ── Context helpers ───────────────────────────────────────────────────────────

pub fn settings() -> Settings {
    Settings {
        deploy_script: "/opt/sandbox/deploy.sh".into(),
        ..Settings::default()
    }
}

pub fn app(runner: RecordingRunner) -> AppContext<RecordingRunner> {
    app_with(runner, false)
}

pub fn json_app(runner: RecordingRunner) -> AppContext<RecordingRunner> {
    app_with(runner, true)
}

fn app_with(runner: RecordingRunner, json: bool) -> AppContext<RecordingRunner> {
    let flags = OutputFlags {
        no_color: true,
        quiet: true,
        json,
    };
    AppContext::with_actions(&flags, SandboxActions::new(runner, settings()))
}

// ── kubectl fixtures ──────────────────────────────────────────────────────────

pub const NAMESPACES: &[u8] = br#"{
  "kind": "List",
  "items": [
    {"kind": "Namespace", "metadata": {"name": "default"}, "status": {"phase": "Active"}},
    {"kind": "Namespace", "metadata": {"name": "user-alice"}, "status": {"phase": "Active"}},
    {"kind": "Namespace", "metadata": {"name": "user-bob"}, "status": {"phase": "Active"}}
  ]
}"#;

pub const PODS: &[u8] = br#"{
  "kind": "List",
  "items": [
    {
      "kind": "Pod",
      "metadata": {"name": "alice-rstudio-0", "namespace": "user-alice", "labels": {"app": "alice-rstudio"}},
      "status": {
        "phase": "Running",
        "conditions": [
          {"type": "Initialized", "status": "True", "lastTransitionTime": "2024-01-01T00:00:00Z"},
          {"type": "Ready", "status": "True", "lastTransitionTime": "2024-01-01T00:05:00Z"}
        ]
      }
    }
  ]
}"#;
