//! Integration tests for the mediasync CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{fixture_path, temp_fixture};

/// Command with color off and config pointed at an empty temp dir.
fn mediasync(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mediasync").expect("binary should build");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env("MEDIASYNC_CONFIG", config_dir.path().join("config.toml"));
    cmd
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_shows_package_version() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir).assert().code(2);
}

// ============================================================================
// replay
// ============================================================================

#[test]
fn replay_prints_steps_preview_and_verdict() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .args(["replay", "--width", "30"])
        .arg(fixture_path("load_progress.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario: load progress"))
        .stdout(predicate::str::contains("load_start"))
        .stdout(predicate::str::contains("notify(99)"))
        .stdout(predicate::str::contains("⏸ paused"))
        .stdout(predicate::str::contains("PASS (4 expectation(s))"));
}

#[test]
fn replay_no_preview_omits_status() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .args(["replay", "--no-preview"])
        .arg(fixture_path("seek_and_play.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("seek(10.20) play()"))
        .stdout(predicate::str::contains("⏸").not());
}

#[test]
fn replay_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let output = mediasync(&dir)
        .args(["replay", "--json"])
        .arg(fixture_path("network_error.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "network error");
    assert_eq!(json["failures"].as_array().map(Vec::len), Some(0));
    assert_eq!(json["steps"][2]["snapshot"]["playback"]["error"], "network_failure");
    assert_eq!(json["steps"][2]["notified"][0], 0.0);
}

#[test]
fn replay_failing_scenario_exits_1() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .arg("replay")
        .arg(fixture_path("failing.toml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL"))
        .stdout(predicate::str::contains("step 2: progress expected 50, got 0"))
        .stderr(predicate::str::contains("2 expectation(s) failed"));
}

#[test]
fn replay_missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .args(["replay", "/nonexistent/trace.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Scenario not found"));
}

#[test]
fn replay_uses_tolerance_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[sync]\nseek_tolerance_secs = 1.0\n",
    )
    .unwrap();

    // 0.7s drift no longer triggers a seek
    mediasync(&dir)
        .arg("replay")
        .arg(fixture_path("seek_and_play.toml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("commands expected"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[sync]\nbuffering_progress_cap = 150.0\n",
    )
    .unwrap();

    mediasync(&dir)
        .arg("replay")
        .arg(fixture_path("load_progress.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("buffering_progress_cap"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn check_passing_files() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .arg("check")
        .arg(fixture_path("load_progress.toml"))
        .arg(fixture_path("autoplay_rejected.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS load progress"))
        .stdout(predicate::str::contains("PASS autoplay rejected"))
        .stdout(predicate::str::contains("2 passed, 0 failed"));
}

#[test]
fn check_reports_failures_and_parse_errors() {
    let dir = TempDir::new().unwrap();
    let (_fixture_dir, malformed) = temp_fixture("malformed.toml");
    mediasync(&dir)
        .arg("check")
        .arg(fixture_path("network_error.toml"))
        .arg(fixture_path("failing.toml"))
        .arg(&malformed)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("PASS network error"))
        .stdout(predicate::str::contains("FAIL wrong expectation"))
        .stdout(predicate::str::contains("ERROR Invalid scenario"))
        .stdout(predicate::str::contains("1 passed, 2 failed"));
}

#[test]
fn check_requires_a_file() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn completions_for_bash() {
    let dir = TempDir::new().unwrap();
    mediasync(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mediasync"));
}
