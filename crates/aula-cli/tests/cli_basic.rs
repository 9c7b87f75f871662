//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify exit codes and JSON output.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "aula-cli", "--"])
        .args(args)
        .env("AULA_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config list is not JSON");
    assert!(parsed["session"]["group_count"].is_number());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "session.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("timer status is not JSON");
    assert!(parsed["remaining_seconds"].is_number());
    assert!(parsed["display"].is_string());
}

#[test]
fn test_timer_reset_then_status_is_idle() {
    let (_, _, code) = run_cli(&["timer", "reset"]);
    assert_eq!(code, 0, "timer reset failed");
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["state"], "idle");
}

#[test]
fn test_pairing_spin_emits_sector_assigned() {
    let (_, _, code) = run_cli(&["pairing", "reset"]);
    assert_eq!(code, 0, "pairing reset failed");

    let (stdout, _, code) = run_cli(&["pairing", "spin", "1", "--seed", "7"]);
    assert_eq!(code, 0, "pairing spin failed");
    assert!(stdout.contains("\"SectorAssigned\""));
}

#[test]
fn test_pairing_spin_sector_zero_fails() {
    let (_, stderr, code) = run_cli(&["pairing", "spin", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("sector numbers start at 1"));
}

#[test]
fn test_pairing_status() {
    let (stdout, _, code) = run_cli(&["pairing", "status"]);
    assert_eq!(code, 0, "pairing status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["sector_assignments"].is_array());
    assert!(parsed["used"].is_array());
}

#[test]
fn test_session_status() {
    let (stdout, _, code) = run_cli(&["session", "status"]);
    assert_eq!(code, 0, "session status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["pairing"].is_object());
    assert!(parsed["timer"].is_object());
}
