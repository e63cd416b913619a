//! End-to-end tests with stub external programs.
//!
//! Each test writes small shell scripts standing in for `helm`, `kubectl`
//! and `deploy.sh`, and points the binary at them through the environment.

#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

/// Binary with a clean view of the variables it reads.
fn sandbox_deploy(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sandbox-deploy"));
    cmd.env("NO_COLOR", "1")
        .env_remove("SANDBOX")
        .env_remove("PLATFORM_ENV")
        .env_remove("CHART_ENV_CONFIG")
        .env_remove("USERNAME")
        .env_remove("EMAIL")
        .env_remove("FULLNAME")
        .env_remove("SANDBOX_DEPLOY_TIMEOUT")
        .current_dir(dir);
    cmd
}

const ECHO_HELM: &str = r#"echo "helm $*""#;

const NAMESPACES: &str = r#"cat <<'JSON'
{"kind":"List","items":[
 {"kind":"Namespace","metadata":{"name":"kube-system"},"status":{"phase":"Active"}},
 {"kind":"Namespace","metadata":{"name":"user-alice"},"status":{"phase":"Active"}},
 {"kind":"Namespace","metadata":{"name":"user-bob"},"status":{"phase":"Active"}}
]}
JSON"#;

const PODS: &str = r#"cat <<'JSON'
{"kind":"List","items":[
 {"kind":"Pod","metadata":{"name":"alice-rstudio-0","namespace":"user-alice","labels":{"app":"alice-rstudio"}},
  "status":{"phase":"Pending","conditions":[
   {"type":"PodScheduled","status":"True","lastTransitionTime":"2024-03-01T10:00:00Z"},
   {"type":"ContainersReady","status":"False","message":"containers with unready status: [rstudio]","lastTransitionTime":"2024-03-01T10:01:00Z"}
  ]}}
]}
JSON"#;

// --- deploy ---

#[test]
fn test_deploy_projects_arguments_and_defaults() {
    let tmp = TempDir::new().expect("tempdir");
    let script = write_script(
        tmp.path(),
        "deploy.sh",
        r#"echo "user=$USERNAME email=$EMAIL env=$PLATFORM_ENV helm=$HELM""#,
    );

    sandbox_deploy(tmp.path())
        .env("SANDBOX_DEPLOY_SCRIPT", &script)
        .env_remove("HELM")
        .args(["deploy", "--username", "alice", "--email", "a@example.com"])
        .assert()
        .success()
        .stdout("user=alice email=a@example.com env=sandbox helm=helm\n");
}

#[test]
fn test_deploy_uses_ambient_sandbox_as_platform_env() {
    let tmp = TempDir::new().expect("tempdir");
    let script = write_script(tmp.path(), "deploy.sh", r#"echo "env=$PLATFORM_ENV""#);

    sandbox_deploy(tmp.path())
        .env("SANDBOX_DEPLOY_SCRIPT", &script)
        .env("SANDBOX", "alpha")
        .args(["deploy", "--username", "alice"])
        .assert()
        .success()
        .stdout("env=alpha\n");
}

#[test]
fn test_deploy_failure_prints_output_and_error() {
    let tmp = TempDir::new().expect("tempdir");
    let script = write_script(
        tmp.path(),
        "deploy.sh",
        "echo 'installing chart'; echo 'Error: UPGRADE FAILED' >&2; exit 3",
    );

    sandbox_deploy(tmp.path())
        .env("SANDBOX_DEPLOY_SCRIPT", &script)
        .args(["deploy", "--username", "alice"])
        .assert()
        .code(1)
        .stdout("installing chart\nError: UPGRADE FAILED\n")
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("exit status 3"));
}

#[test]
fn test_deploy_timeout_kills_script() {
    let tmp = TempDir::new().expect("tempdir");
    let script = write_script(tmp.path(), "deploy.sh", "exec sleep 30");

    sandbox_deploy(tmp.path())
        .env("SANDBOX_DEPLOY_SCRIPT", &script)
        .env("SANDBOX_DEPLOY_TIMEOUT", "1")
        .args(["deploy", "--username", "alice"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timed out"));
}

// --- delete_user / delete_chart ---

#[test]
fn test_delete_user_runs_helm_delete() {
    let tmp = TempDir::new().expect("tempdir");
    let helm = write_script(tmp.path(), "helm", ECHO_HELM);

    sandbox_deploy(tmp.path())
        .env("HELM", &helm)
        .args(["delete_user", "bob"])
        .assert()
        .success()
        .stdout("helm delete init-user-bob --purge\n");
}

#[test]
fn test_delete_chart_defaults_to_rstudio() {
    let tmp = TempDir::new().expect("tempdir");
    let helm = write_script(tmp.path(), "helm", ECHO_HELM);

    sandbox_deploy(tmp.path())
        .env("HELM", &helm)
        .args(["delete_chart", "bob"])
        .assert()
        .success()
        .stdout("helm delete bob-rstudio --purge\n");
}

#[test]
fn test_delete_chart_explicit_helm_wins_over_ambient() {
    let tmp = TempDir::new().expect("tempdir");
    let ambient = write_script(tmp.path(), "helm-ambient", "echo ambient; exit 1");
    let explicit = write_script(tmp.path(), "helm-explicit", ECHO_HELM);

    sandbox_deploy(tmp.path())
        .env("HELM", &ambient)
        .args(["delete_chart", "bob", "jupyter", "--helm"])
        .arg(&explicit)
        .assert()
        .success()
        .stdout("helm delete bob-jupyter --purge\n");
}

#[test]
fn test_delete_user_invalid_username_exits_one() {
    let tmp = TempDir::new().expect("tempdir");
    let helm = write_script(tmp.path(), "helm", "echo should-not-run");

    sandbox_deploy(tmp.path())
        .env("HELM", &helm)
        .args(["delete_user", "Bob Smith"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("should-not-run").not())
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn test_delete_user_helm_failure_exits_one() {
    let tmp = TempDir::new().expect("tempdir");
    let helm = write_script(
        tmp.path(),
        "helm",
        r#"echo 'Error: release: "init-user-bob" not found' >&2; exit 1"#,
    );

    sandbox_deploy(tmp.path())
        .env("HELM", &helm)
        .args(["delete_user", "bob"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("ERROR:"));
}

// --- list / pod_statuses ---

#[test]
fn test_list_prints_one_sandbox_per_line() {
    let tmp = TempDir::new().expect("tempdir");
    let kubectl = write_script(tmp.path(), "kubectl", NAMESPACES);

    sandbox_deploy(tmp.path())
        .env("KUBECTL", &kubectl)
        .arg("list")
        .assert()
        .success()
        .stdout("alice\nbob\n");
}

#[test]
fn test_list_json() {
    let tmp = TempDir::new().expect("tempdir");
    let kubectl = write_script(tmp.path(), "kubectl", NAMESPACES);

    let output = sandbox_deploy(tmp.path())
        .env("KUBECTL", &kubectl)
        .args(["list", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value, serde_json::json!(["alice", "bob"]));
}

#[test]
fn test_list_kubectl_failure_exits_one() {
    let tmp = TempDir::new().expect("tempdir");
    let kubectl = write_script(
        tmp.path(),
        "kubectl",
        "echo 'The connection to the server localhost:8080 was refused' >&2; exit 1",
    );

    sandbox_deploy(tmp.path())
        .env("KUBECTL", &kubectl)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn test_list_kubectl_failure_json_reports_error_object() {
    let tmp = TempDir::new().expect("tempdir");
    let kubectl = write_script(
        tmp.path(),
        "kubectl",
        "echo 'The connection to the server localhost:8080 was refused' >&2; exit 1",
    );

    let output = sandbox_deploy(tmp.path())
        .env("KUBECTL", &kubectl)
        .args(["list", "--json"])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("ERROR:"));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(json["error"], true);
    assert!(json["message"].as_str().expect("message").contains("exit status 1"));
    assert_eq!(
        json["output"],
        "The connection to the server localhost:8080 was refused\n"
    );
}

#[test]
fn test_invalid_settings_json_reports_error_object() {
    let tmp = TempDir::new().expect("tempdir");

    let output = sandbox_deploy(tmp.path())
        .env("SANDBOX_DEPLOY_TIMEOUT", "soon")
        .args(["list", "--json"])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(json["error"], true);
    assert!(
        json["message"]
            .as_str()
            .expect("message")
            .starts_with("invalid sandbox-deploy environment")
    );
    assert!(json["output"].is_null());
}

#[test]
fn test_pod_statuses_json_reports_latest_condition() {
    let tmp = TempDir::new().expect("tempdir");
    let kubectl = write_script(tmp.path(), "kubectl", PODS);

    let output = sandbox_deploy(tmp.path())
        .env("KUBECTL", &kubectl)
        .args(["pod_statuses", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(
        value,
        serde_json::json!([{
            "user": "alice",
            "app": "alice-rstudio",
            "phase": "Pending",
            "status": "ContainersReady",
            "lastTransitionTime": "2024-03-01T10:01:00Z",
            "error": true,
            "messages": "containers with unready status: [rstudio]"
        }])
    );
}

#[test]
fn test_pod_statuses_bad_output_exits_one() {
    let tmp = TempDir::new().expect("tempdir");
    let kubectl = write_script(tmp.path(), "kubectl", "echo 'error: You must be logged in'");

    sandbox_deploy(tmp.path())
        .env("KUBECTL", &kubectl)
        .arg("pod_statuses")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR:"));
}
