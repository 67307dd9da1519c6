//! CLI integration tests using assert_cmd
//!
//! These tests verify the CLI commands work correctly end-to-end.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the tether binary
fn tether_cmd() -> Command {
    Command::cargo_bin("tether").expect("Failed to find tether binary")
}

/// Get a command instance pointed at a settings file inside `dir`
fn tether_with_config(dir: &TempDir) -> (Command, PathBuf) {
    let path = dir.path().join("settings.json");
    let mut cmd = tether_cmd();
    cmd.arg("--config").arg(&path);
    (cmd, path)
}

fn run(dir: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    let (mut cmd, _) = tether_with_config(dir);
    cmd.args(args).assert()
}

#[test]
fn test_help_command() {
    tether_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tether - connection profile manager"));
}

#[test]
fn test_version_command() {
    tether_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tether"));
}

#[test]
fn test_profile_help() {
    tether_cmd()
        .arg("profile")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage connection profiles"));
}

#[test]
fn test_profile_list_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "list"])
        .success()
        .stdout(predicate::str::contains("No profiles found"));
}

#[test]
fn test_profile_list_uses_tether_home() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    tether_cmd()
        .env("TETHER_HOME", temp_dir.path())
        .args(["profile", "set", "home", "--username", "me"])
        .assert()
        .success();

    assert!(temp_dir.path().join("settings.json").exists());
    tether_cmd()
        .env("TETHER_HOME", temp_dir.path())
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("home"));
}

#[test]
fn test_profile_set_and_show() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(
        &temp_dir,
        &[
            "profile",
            "set",
            "dev",
            "--endpoint",
            "https://dev.example.com",
            "--context",
            "Studio context",
        ],
    )
    .success()
    .stdout(predicate::str::contains("Created profile 'dev'"));

    run(&temp_dir, &["profile", "show", "dev"])
        .success()
        .stdout(predicate::str::contains("\"endpoint\": \"https://dev.example.com\""))
        .stdout(predicate::str::contains("clientId").not());
}

#[test]
fn test_profile_set_replaces_whole_profile() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", "dev", "--client-id", "app"]).success();
    run(&temp_dir, &["profile", "set", "dev", "--endpoint", "https://x"])
        .success()
        .stdout(predicate::str::contains("Replaced profile 'dev'"));

    run(&temp_dir, &["profile", "show", "dev"])
        .success()
        .stdout(predicate::str::contains("clientId").not());
}

#[test]
fn test_profile_set_rejects_empty_name() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", ""])
        .failure()
        .stderr(predicate::str::contains("Name cannot be empty"));
}

#[test]
fn test_profile_show_not_found() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "show", "nonexistent"])
        .failure()
        .stderr(predicate::str::contains("Profile not found"));
}

#[test]
fn test_profile_list_marks_active() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", "a"]).success();
    run(&temp_dir, &["profile", "set", "b"]).success();
    run(&temp_dir, &["profile", "activate", "b"])
        .success()
        .stdout(predicate::str::contains("Active profile set to 'b'"));

    run(&temp_dir, &["profile", "list"])
        .success()
        .stdout(predicate::str::contains("  a\n* b\n"));
    run(&temp_dir, &["profile", "active"])
        .success()
        .stdout(predicate::str::diff("b\n"));
}

#[test]
fn test_profile_activate_unknown_warns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "activate", "ghost"])
        .success()
        .stderr(predicate::str::contains("no profile named 'ghost'"));
}

#[test]
fn test_profile_delete() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", "dev"]).success();
    run(&temp_dir, &["profile", "activate", "dev"]).success();

    run(&temp_dir, &["profile", "delete", "dev"])
        .success()
        .stdout(predicate::str::contains("Deleted profile 'dev'"))
        .stderr(predicate::str::contains("still selected"));

    run(&temp_dir, &["profile", "list"])
        .success()
        .stdout(predicate::str::contains("No profiles found"));
    run(&temp_dir, &["profile", "active"])
        .success()
        .stdout(predicate::str::contains("dev"));
}

#[test]
fn test_profile_delete_unknown_is_not_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "delete", "ghost"])
        .success()
        .stdout(predicate::str::contains("No profile named 'ghost'"));
}

#[test]
fn test_profile_validate_auth_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(
        &temp_dir,
        &[
            "profile",
            "set",
            "dev",
            "--client-id",
            "app.test",
            "--client-secret",
            "",
            "--username",
            "tester",
        ],
    )
    .success();

    run(&temp_dir, &["profile", "validate", "dev"])
        .success()
        .stdout(predicate::str::contains("dev: authcode"));
}

#[test]
fn test_profile_validate_active_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", "dev", "--token-file", "/tmp/token"]).success();
    run(&temp_dir, &["profile", "activate", "dev"]).success();

    let output = run(&temp_dir, &["profile", "validate", "--json"])
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("Invalid JSON output");
    assert_eq!(json["profile"], "dev");
    assert_eq!(json["result"]["type"], "tokenfile");
    assert_eq!(json["result"]["data"], "/tmp/token");
    assert_eq!(json["result"]["error"], "");
}

#[test]
fn test_profile_validate_without_active_profile() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "validate"])
        .failure()
        .stderr(predicate::str::contains("No Active Profile"));
}

#[test]
fn test_profile_validate_incomplete() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", "dev", "--endpoint", "https://x"]).success();

    run(&temp_dir, &["profile", "validate", "dev"])
        .failure()
        .stderr(predicate::str::contains("Incomplete profile"));
}

#[test]
fn test_settings_file_written_as_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (mut cmd, path) = tether_with_config(&temp_dir);

    cmd.args(["profile", "set", "dev", "--username", "me"])
        .assert()
        .success();

    let content = fs::read_to_string(path).expect("Failed to read settings");
    let json: serde_json::Value = serde_json::from_str(&content).expect("Invalid JSON");
    assert_eq!(
        json["connectionProfiles"]["profiles"]["dev"]["username"],
        "me"
    );
    assert_eq!(json["connectionProfiles"]["activeProfile"], "");
}

#[test]
fn test_invalid_scope() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", "dev", "--scope", "managed"])
        .failure()
        .stderr(predicate::str::contains("Invalid scope"));
}

#[test]
fn test_workspace_scope_uses_workspace_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let workspace = temp_dir.path().join("workspace.json");
    let workspace_arg = workspace.to_str().expect("temp path is not UTF-8");

    run(&temp_dir, &["profile", "set", "shared", "--username", "me"]).success();
    run(
        &temp_dir,
        &[
            "--workspace",
            workspace_arg,
            "--scope",
            "workspace",
            "profile",
            "set",
            "local",
            "--endpoint",
            "x",
        ],
    )
    .success()
    .stdout(predicate::str::contains("Created profile 'local'"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&workspace).expect("Failed to read workspace"))
            .expect("Invalid JSON");
    assert_eq!(
        json["connectionProfiles"]["profiles"]["local"]["endpoint"],
        "x"
    );

    run(
        &temp_dir,
        &["profile", "list", "--workspace", workspace_arg, "--scope", "workspace"],
    )
    .success()
    .stdout(predicate::str::contains("local"))
    .stdout(predicate::str::contains("shared").not());
    run(&temp_dir, &["profile", "list", "--workspace", workspace_arg])
        .success()
        .stdout(predicate::str::contains("shared"))
        .stdout(predicate::str::contains("local").not());
}

#[test]
fn test_workspace_scope_requires_workspace_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    run(&temp_dir, &["profile", "set", "dev", "--scope", "workspace"])
        .failure()
        .stderr(predicate::str::contains("--scope workspace requires --workspace"));
}

#[test]
fn test_profile_list_tolerates_odd_active_profile() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (mut cmd, path) = tether_with_config(&temp_dir);
    fs::write(
        &path,
        r#"{"connectionProfiles": {"activeProfile": null, "profiles": {"a": {"endpoint": 42}}}}"#,
    )
    .expect("Failed to write settings");

    cmd.args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  a\n"));
    run(&temp_dir, &["profile", "show", "a"])
        .success()
        .stdout(predicate::str::contains("\"endpoint\": 42"));
}
