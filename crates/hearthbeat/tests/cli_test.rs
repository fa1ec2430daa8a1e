//! Integration tests for the `hearthbeat` CLI binary.
//!
//! These tests validate argument parsing, help output, shell
//! completions, and error handling — all without requiring a live hub.
#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `hearthbeat` binary with env isolation.
///
/// Clears all `HEARTHBEAT_*` env vars and points config directories at
/// a nonexistent path so tests never touch the user's real
/// configuration.
fn hearthbeat_cmd() -> Command {
    let mut cmd = Command::cargo_bin("hearthbeat").unwrap();
    cmd.env("HOME", "/tmp/hearthbeat-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/hearthbeat-cli-test-nonexistent")
        .env_remove("HEARTHBEAT_URL")
        .env_remove("HEARTHBEAT_TOKEN")
        .env_remove("HEARTHBEAT_TIMEOUT")
        .env_remove("HEARTHBEAT_HUB__URL")
        .env_remove("HEARTHBEAT_HUB__TOKEN")
        .env_remove("HEARTHBEAT_ENGINE__POLL_INTERVAL_SECS");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = hearthbeat_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    hearthbeat_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Home Assistant")
            .and(predicate::str::contains("serve"))
            .and(predicate::str::contains("stats"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    hearthbeat_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hearthbeat"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    hearthbeat_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    hearthbeat_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = hearthbeat_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_stats_without_token_fails_with_auth_exit_code() {
    let output = hearthbeat_cmd()
        .args(["stats", "--no-telemetry"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(3),
        "Expected the auth exit code:\n{}",
        combined_output(&output)
    );
    let text = combined_output(&output);
    assert!(
        text.contains("token") || text.contains("Token"),
        "Expected error mentioning the missing token:\n{text}"
    );
}

#[test]
fn test_serve_rejects_out_of_range_interval() {
    let output = hearthbeat_cmd()
        .args(["--token", "t", "serve", "--interval", "5"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(2),
        "Expected the usage exit code:\n{}",
        combined_output(&output)
    );
    let text = combined_output(&output);
    assert!(
        text.contains("poll_interval_secs"),
        "Expected validation error naming the field:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = hearthbeat_cmd()
        .args(["--output", "invalid", "stats"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_show_without_file_prints_defaults() {
    hearthbeat_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("poll_interval_secs")
                .and(predicate::str::contains("enable_fun_stats")),
        );
}

#[test]
fn test_config_show_redacts_the_token() {
    hearthbeat_cmd()
        .args(["--token", "super-secret-token", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("<redacted>")
                .and(predicate::str::contains("super-secret-token").not()),
        );
}

#[test]
fn test_config_path_prints_a_path() {
    hearthbeat_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_serve_flags_exist() {
    hearthbeat_cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--bind")
                .and(predicate::str::contains("--port"))
                .and(predicate::str::contains("--interval")),
        );
}

#[test]
fn test_stats_flags_exist() {
    hearthbeat_cmd()
        .args(["stats", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--no-fun").and(predicate::str::contains("--no-telemetry")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    hearthbeat_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("show")
                .and(predicate::str::contains("init"))
                .and(predicate::str::contains("path")),
        );
}
