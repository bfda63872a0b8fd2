//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "cco-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Cloud Cost Optimizer"),
        "Should show app name"
    );
    assert!(stdout.contains("simulate"), "Should show simulate command");
    assert!(stdout.contains("get"), "Should show get command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "cco-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("cco"), "Should show binary name");
}

/// Test simulate subcommand help
#[test]
fn test_simulate_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "cco-cli", "--", "simulate", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Simulate help should succeed");
    assert!(stdout.contains("--resource"), "Should show resource option");
    assert!(stdout.contains("--action"), "Should show action option");
    assert!(stdout.contains("--stop-at"), "Should show stop-at option");
}

/// Test get recommendations subcommand help
#[test]
fn test_get_recommendations_help() {
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "cco-cli",
            "--",
            "get",
            "recommendations",
            "--help",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Get recommendations help should succeed"
    );
}

/// Unknown actions are rejected before any network call
#[test]
fn test_simulate_rejects_unknown_action() {
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "cco-cli",
            "--",
            "simulate",
            "--resource",
            "i-1",
            "--action",
            "teleport",
        ])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success(), "Unknown action should fail");
    assert!(stderr.contains("Unknown action"), "Should name the problem");
}
