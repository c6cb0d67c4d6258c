//! CLI integration tests
//!
//! These tests run the built binary and check:
//! - Argument parsing and validation
//! - Summary output on stdout
//! - Exit codes

mod support;

use std::env;
use std::path::PathBuf;
use std::process::Command;
use support::Workspace;

/// Helper to get the path to the dataforge binary
fn dataforge_bin() -> PathBuf {
    // In tests, the binary should be at target/debug/dataforge
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("dataforge")
}

fn dataforge() -> Command {
    let mut cmd = Command::new(dataforge_bin());
    for key in [
        "DATAFORGE_SOURCE_DIR",
        "DATAFORGE_OUTPUT_DIR",
        "DATAFORGE_MAPPING_FILE",
        "DATAFORGE_SEARCH_URL",
        "DATAFORGE_LOG_LEVEL",
        "DATAFORGE_LOG_JSON",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_cli_help() {
    let output = dataforge().arg("--help").output().expect("Failed to execute dataforge");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dataforge"));
    assert!(stdout.contains("--phase"));
    assert!(stdout.contains("protocols"));
}

#[test]
fn test_cli_version() {
    let output = dataforge().arg("--version").output().expect("Failed to execute dataforge");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("dataforge"));
}

#[test]
fn test_unknown_phase_is_rejected() {
    let output = dataforge()
        .args(["--phase", "weapons"])
        .output()
        .expect("Failed to execute dataforge");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("weapons"));
}

#[test]
fn test_json_summary_for_selected_phases() {
    let ws = Workspace::standard();
    let output = dataforge()
        .arg("--source")
        .arg(ws.source.path())
        .arg("--output")
        .arg(ws.output.path())
        .args(["--phase", "qa", "beans", "--format", "json"])
        .output()
        .expect("Failed to execute dataforge");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON summary");
    let phases: Vec<&str> = summary["phases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["phase"].as_str().unwrap())
        .collect();
    assert_eq!(phases, vec!["beans", "qa"]);
    assert_eq!(summary["qa"]["duplicate_variants"], 2);
    assert!(ws.game_data("bean_mappings.json").is_file());
}

#[test]
fn test_human_summary_default() {
    let ws = Workspace::standard();
    let output = dataforge()
        .arg("--source")
        .arg(ws.source.path())
        .arg("--output")
        .arg(ws.output.path())
        .output()
        .expect("Failed to execute dataforge");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dataset run:"));
    assert!(stdout.contains("6 succeeded, 0 failed"));
}

#[test]
fn test_invalid_log_level_exits_nonzero() {
    let ws = Workspace::new();
    let output = dataforge()
        .arg("--source")
        .arg(ws.source.path())
        .arg("--output")
        .arg(ws.output.path())
        .args(["--log-level", "chatty"])
        .output()
        .expect("Failed to execute dataforge");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}
