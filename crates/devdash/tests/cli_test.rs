//! Integration tests for the `devdash` CLI binary.
//!
//! Device and config commands run against bundled data and a temporary
//! config file; session and access commands run against a wiremock auth
//! service.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `devdash` binary with env isolation.
///
/// Clears all `DEVDASH_*` env vars and points the config file at `config`
/// so tests never touch the user's real configuration.
fn devdash_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("devdash");
    cmd.env("DEVDASH_CONFIG", config)
        .env("HOME", "/tmp/devdash-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/devdash-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("DEVDASH_PROFILE")
        .env_remove("DEVDASH_SERVER")
        .env_remove("DEVDASH_EMAIL")
        .env_remove("DEVDASH_PASSWORD")
        .env_remove("DEVDASH_OUTPUT")
        .env_remove("DEVDASH_INSECURE")
        .env_remove("DEVDASH_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// A command with a fresh, empty config location.
fn isolated() -> (tempfile::TempDir, assert_cmd::Command) {
    let dir = tempfile::tempdir().unwrap();
    let cmd = devdash_cmd(&dir.path().join("config.toml"));
    (dir, cmd)
}

/// A command logged in as `email` against `server`.
fn against(server: &MockServer) -> (tempfile::TempDir, assert_cmd::Command) {
    let (dir, mut cmd) = isolated();
    cmd.args(["--server", &server.uri(), "--email", "u@example.com"])
        .env("DEVDASH_PASSWORD", "pw");
    (dir, cmd)
}

async fn mount_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "role": role, "groups": [], "email": "u@example.com" }
        })))
        .mount(server)
        .await;
}

async fn mount_check_auth(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/auth/api/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, mut cmd) = isolated();
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("--help").assert().success().stdout(
        predicate::str::contains("devices")
            .and(predicate::str::contains("session"))
            .and(predicate::str::contains("access"))
            .and(predicate::str::contains("navigate")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devdash"));
}

#[test]
fn test_completions_zsh() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--output", "invalid", "devices", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible values").or(predicate::str::contains("invalid")));
}

// ── Devices (bundled data) ──────────────────────────────────────────

#[test]
fn test_devices_list_table() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["devices", "list"]).assert().success().stdout(
        predicate::str::contains("Router-Core-01")
            .and(predicate::str::contains("Kiosk-Terminal"))
            .and(predicate::str::contains("offline")),
    );
}

#[test]
fn test_devices_list_requires_every_tag() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["-o", "plain", "devices", "list", "--tag", "lan", "--tag", "core"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "1\n4");
}

#[test]
fn test_devices_list_search_is_case_insensitive() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["-o", "plain", "devices", "list", "--search", "ap-"])
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output).trim(), "2\n5");
}

#[test]
fn test_devices_list_online_only() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["-o", "plain", "devices", "list", "--online"])
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output).trim(), "1\n2\n3");
}

#[test]
fn test_devices_get_fills_defaults() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["-o", "json", "devices", "get", "6"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let device: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(device["name"], "Kiosk-Terminal");
    assert_eq!(device["mac"], "00:00:00:00:00:00");
    assert_eq!(device["online"], false);
    assert_eq!(device["simCards"], json!([]));
}

#[test]
fn test_devices_get_unknown_id() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["devices", "get", "99"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_devices_tags_first_seen_order() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["-o", "plain", "devices", "tags"])
        .output()
        .unwrap();
    assert_eq!(stdout_of(&output).trim(), "lan\ncore\nwifi\noffice\nlte");
}

#[test]
fn test_devices_from_profile_file() {
    let dir = tempfile::tempdir().unwrap();
    let devices = dir.path().join("devices.json");
    std::fs::write(
        &devices,
        r#"{ "items": [{ "name": "Router-A", "ip": "10.0.0.1", "tags": ["lan"] }] }"#,
    )
    .unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "default_profile = \"lab\"\n\n[profiles.lab]\nserver = \"http://localhost:3000\"\ndevices_file = {:?}\n",
            devices.display().to_string()
        ),
    )
    .unwrap();

    let output = devdash_cmd(&config)
        .args(["-o", "json", "devices", "list", "--search", "10.0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list[0]["id"], "1");
    assert_eq!(list[0]["mac"], "00:00:00:00:00:00");
    assert_eq!(list[0]["speed"], "0 Мбит/с");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["config", "show"]).assert().success();
}

#[test]
fn test_config_set_and_use() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    devdash_cmd(&config)
        .args(["--profile", "lab", "config", "set", "server", "https://dash.example.com"])
        .assert()
        .success();
    devdash_cmd(&config)
        .args(["--profile", "lab", "config", "set", "logout_policy", "always-clear"])
        .assert()
        .success();
    devdash_cmd(&config)
        .args(["config", "use", "lab"])
        .assert()
        .success();

    devdash_cmd(&config)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab *"));

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("always-clear"));
}

#[test]
fn test_config_use_unknown_profile() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["config", "use", "nope"]).assert().code(4);
}

#[test]
fn test_config_set_rejects_bad_policy() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["config", "set", "logout_policy", "sometimes"])
        .assert()
        .code(2);
}

// ── Routes ──────────────────────────────────────────────────────────

#[test]
fn test_routes_without_server_lists_paths() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["-o", "plain", "routes"]).assert().success().stdout(
        predicate::str::contains("/device/:id").and(predicate::str::contains("/auth/login")),
    );
}

// ── Auth service ────────────────────────────────────────────────────

#[test]
fn test_session_check_without_server() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["session", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No auth service configured"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_check_reports_user() {
    let server = MockServer::start().await;
    mount_login(&server, "viewer").await;
    mount_check_auth(
        &server,
        json!({ "authenticated": true, "user": { "role": "viewer", "groups": [{ "name": "ops" }] } }),
    )
    .await;

    let (_dir, mut cmd) = against(&server);
    let output = cmd.args(["-o", "json", "session", "check"]).output().unwrap();
    assert!(output.status.success());

    let session: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(session["authenticated"], true);
    assert_eq!(session["loading"], false);
    assert_eq!(session["user"]["groups"][0]["name"], "ops");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "invalid credentials"
        })))
        .mount(&server)
        .await;

    let (_dir, mut cmd) = against(&server);
    cmd.arg("login")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid credentials"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_access_admin_denied_for_viewer() {
    let server = MockServer::start().await;
    mount_login(&server, "viewer").await;

    let (_dir, mut cmd) = against(&server);
    cmd.args(["access", "admin"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("admin"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_access_admin_granted() {
    let server = MockServer::start().await;
    mount_login(&server, "admin").await;

    let (_dir, mut cmd) = against(&server);
    cmd.args(["-o", "plain", "access", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("granted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_access_without_session_redirects() {
    let server = MockServer::start().await;
    mount_check_auth(&server, json!({ "authenticated": false })).await;

    let (_dir, mut cmd) = isolated();
    cmd.args(["--server", &server.uri(), "access", "auth"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("/auth/login"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_navigate_proceeds_with_session() {
    let server = MockServer::start().await;
    mount_login(&server, "viewer").await;
    mount_check_auth(&server, json!({ "authenticated": true, "user": { "role": "viewer" } }))
        .await;

    let (_dir, mut cmd) = against(&server);
    let output = cmd
        .args(["-o", "json", "navigate", "/device/3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let nav: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(nav["navigation"], "proceed");
    assert_eq!(nav["url"], "/device/3");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_navigate_redirects_to_login() {
    let server = MockServer::start().await;
    mount_check_auth(&server, json!({ "authenticated": false })).await;

    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["--server", &server.uri(), "-o", "plain", "navigate", "/device"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output).trim(),
        format!("{}/auth/login", server.uri())
    );
}
