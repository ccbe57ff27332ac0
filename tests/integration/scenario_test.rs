//! Integration tests for scenario replay through the public API

use mediasync::config::SyncConfig;
use mediasync::render::render_preview;
use mediasync::scenario::{run_scenario, Scenario, ScenarioError};
use mediasync::sync::{MediaErrorKind, SurfaceCommand};

use super::helpers::{fixture_path, fixtures_dir, load_fixture, temp_fixture};

fn replay(name: &str) -> mediasync::ReplayReport {
    let scenario = Scenario::load(&fixture_path(name)).expect("fixture should load");
    run_scenario(&scenario, &SyncConfig::default())
}

#[test]
fn every_passing_fixture_passes() {
    for name in [
        "load_progress.toml",
        "seek_and_play.toml",
        "network_error.toml",
        "autoplay_rejected.json",
    ] {
        let report = replay(name);
        assert!(report.passed(), "{}: {:?}", name, report.failures);
        assert!(report.expectation_count() > 0, "{} has no expectations", name);
    }
}

#[test]
fn load_progress_notifications_in_order() {
    let report = replay("load_progress.toml");
    let notified: Vec<f64> = report
        .steps
        .iter()
        .flat_map(|s| s.notified.iter().copied())
        .collect();
    assert_eq!(notified, vec![0.0, 40.0, 99.0, 100.0]);
    assert!(report.final_snapshot.playback.is_loaded);
    assert_eq!(report.final_snapshot.playback.duration, 100.0);
}

#[test]
fn seek_and_play_commands() {
    let report = replay("seek_and_play.toml");
    let commands: Vec<SurfaceCommand> = report
        .steps
        .iter()
        .flat_map(|s| s.commands.iter().cloned())
        .collect();
    assert_eq!(
        commands,
        vec![
            SurfaceCommand::Seek { to: 10.2 },
            SurfaceCommand::Play,
            SurfaceCommand::Pause,
        ]
    );
    assert!(!report.final_snapshot.playback.is_playing);
}

#[test]
fn network_error_then_retry() {
    let report = replay("network_error.toml");
    // Error step is the third step
    assert_eq!(
        report.steps[2].snapshot.playback.error,
        Some(MediaErrorKind::NetworkFailure)
    );
    assert!(report.steps[2].snapshot.retry_available);
    assert!(report.final_snapshot.playback.error.is_none());
}

#[test]
fn failing_fixture_reports_each_mismatch() {
    let report = replay("failing.toml");
    assert!(!report.passed());
    let fields: Vec<&str> = report.failures.iter().map(|f| f.field).collect();
    assert_eq!(fields, vec!["progress", "is_loaded"]);
    assert_eq!(
        report.failures[0].to_string(),
        "step 2: progress expected 50, got 0"
    );
}

#[test]
fn malformed_fixture_is_a_parse_error() {
    let err = Scenario::load(&fixture_path("malformed.toml")).unwrap_err();
    assert!(matches!(err, ScenarioError::Parse { .. }));
}

#[test]
fn name_defaults_to_file_stem() {
    let (_dir, path) = temp_fixture("failing.toml");
    let content = load_fixture("failing.toml").replace("name = \"wrong expectation\"\n", "");
    std::fs::write(&path, content).unwrap();

    let scenario = Scenario::load(&path).unwrap();
    assert_eq!(scenario.display_name(), "failing");
}

#[test]
fn custom_tolerance_changes_seek_behavior() {
    let scenario = Scenario::load(&fixtures_dir().join("seek_and_play.toml")).unwrap();
    let loose = SyncConfig {
        seek_tolerance_secs: 1.0,
        ..SyncConfig::default()
    };
    let report = run_scenario(&scenario, &loose);
    // 0.7s drift is inside a 1s band, so the first expectation fails
    assert!(!report.passed());
    assert_eq!(report.failures[0].field, "commands");
}

#[test]
fn final_preview_of_loaded_scenario() {
    let report = replay("load_progress.toml");
    let lines = render_preview(&report.final_snapshot, 30, false).unwrap();
    insta::assert_snapshot!(lines.join("\n"), @r"
    ⏸ paused
    00:00.0 / 1:40.0
    ");
}
