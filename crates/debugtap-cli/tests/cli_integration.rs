//! CLI Integration Tests
//!
//! These verify the wiring between the CLI and debugtap-core: the
//! environment drives the pipeline, emissions land on stderr or in the
//! configured pipe, and drain copies a stream to stdout.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create an emit command with a clean, colorless environment
fn emit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("debugtap").expect("Failed to find debugtap binary");
    cmd.env_remove("DEBUG_FD");
    cmd.env("DEBUG_COLORS", "no");
    cmd.env("DEBUG_HIDE_DATE", "yes");
    cmd.arg("emit");
    cmd
}

// ============================================================================
// Emit Command Tests
// ============================================================================

#[test]
fn test_emit_writes_namespace_to_stderr() {
    emit_cmd()
        .args(["--namespace", "cli:test"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cli:test line #1"));
}

#[test]
fn test_emit_custom_messages_in_order() {
    emit_cmd()
        .args(["-n", "cli:test", "-m", "first %s", "-m", "second %s"])
        .assert()
        .success()
        .stderr(predicate::str::contains("first #1").and(predicate::str::contains("second #2")));
}

#[test]
fn test_emit_with_colors_carries_escapes() {
    let mut cmd = Command::cargo_bin("debugtap").expect("Failed to find debugtap binary");
    cmd.env_remove("DEBUG_FD");
    cmd.env("DEBUG_COLORS", "yes");
    cmd.args(["emit", "-n", "cli:color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\u{1b}[3").and(predicate::str::contains("m+")));
}

#[test]
fn test_emit_into_named_pipe_leaves_stderr_quiet() {
    let temp = TempDir::new().unwrap();
    let pipe = temp.path().join("tap.pipe");

    emit_cmd()
        .env("DEBUG_FD", pipe.to_str().unwrap())
        .args(["-n", "cli:pipe"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cli:pipe").not());
}

#[test]
fn test_emit_refuses_unusable_destination() {
    let temp = TempDir::new().unwrap();
    let pipe = temp.path().join("missing-dir").join("tap.pipe");

    emit_cmd()
        .env("DEBUG_FD", pipe.to_str().unwrap())
        .args(["-n", "cli:bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to set up the output channel"));
}

// ============================================================================
// Drain Command Tests
// ============================================================================

#[test]
fn test_drain_copies_stream_to_stdout() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("captured.log");
    std::fs::write(&path, "one\ntwo\n").unwrap();

    let mut cmd = Command::cargo_bin("debugtap").expect("Failed to find debugtap binary");
    cmd.arg("drain")
        .arg(&path)
        .assert()
        .success()
        .stdout("one\ntwo\n");
}

#[test]
fn test_drain_missing_path_fails() {
    let mut cmd = Command::cargo_bin("debugtap").expect("Failed to find debugtap binary");
    cmd.args(["drain", "/no/such/pipe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}
