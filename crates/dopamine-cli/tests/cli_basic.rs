//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory (DOPAMINE_ENV=dev) and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "dopamine-cli", "--"])
        .args(args)
        .env("DOPAMINE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn unique_username(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Dopamine Hunter CLI"));
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("dopamine-hunter-dev"));
}

#[test]
fn test_completions_generate() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("dopamine-cli"));
}

#[test]
fn test_user_create_and_visit() {
    let username = unique_username("cli-user");
    let (stdout, stderr, code) = run_cli(&["user", "create", &username]);
    assert_eq!(code, 0, "user create failed: {stderr}");

    let user: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = user["id"].as_u64().unwrap().to_string();

    let (stdout, stderr, code) = run_cli(&["user", "visit", &id]);
    assert_eq!(code, 0, "user visit failed: {stderr}");
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["totalVisits"], 1);
    assert_eq!(stats["currentDailyStreak"], 1);
}

#[test]
fn test_unknown_user_fails() {
    let (_, stderr, code) = run_cli(&["user", "show", "999999999"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"));
}
