//! Integration tests for the config subcommands

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use mediasync::Config;

fn mediasync() -> Command {
    let mut cmd = Command::cargo_bin("mediasync").expect("binary should build");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn config_path_honors_env_var() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    mediasync()
        .env("MEDIASYNC_CONFIG", &path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_flag_overrides_env_var() {
    let dir = TempDir::new().unwrap();
    mediasync()
        .env("MEDIASYNC_CONFIG", dir.path().join("from_env.toml"))
        .args(["config", "path", "--config"])
        .arg(dir.path().join("from_flag.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("from_flag.toml"))
        .stdout(predicate::str::contains("from_env.toml").not());
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    mediasync()
        .env("MEDIASYNC_CONFIG", dir.path().join("config.toml"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[sync]"))
        .stdout(predicate::str::contains("seek_tolerance_secs = 0.5"))
        .stdout(predicate::str::contains("level = \"warn\""));
}

#[test]
fn migrate_creates_missing_file_with_yes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    mediasync()
        .env("MEDIASYNC_CONFIG", &path)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file created successfully."));

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn migrate_adds_missing_fields_and_keeps_comments() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "# tuned for slow CDNs\n[sync]\nseek_tolerance_secs = 1.5\n").unwrap();

    mediasync()
        .env("MEDIASYNC_CONFIG", &path)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing field(s)"))
        .stdout(predicate::str::contains("+ buffering_progress_cap = 99.0"))
        .stdout(predicate::str::contains("Config updated successfully."));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# tuned for slow CDNs"));
    assert!(content.contains("seek_tolerance_secs = 1.5"));
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.sync.seek_tolerance_secs, 1.5);
    assert_eq!(config.sync.can_play_progress, 99.0);
}

#[test]
fn migrate_without_yes_is_a_no_op_when_not_interactive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[sync]\n").unwrap();

    mediasync()
        .env("MEDIASYNC_CONFIG", &path)
        .args(["config", "migrate"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made."));

    assert_eq!(fs::read_to_string(&path).unwrap(), "[sync]\n");
}

#[test]
fn migrate_up_to_date_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    Config::default().save_to(&path).unwrap();

    mediasync()
        .env("MEDIASYNC_CONFIG", &path)
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is already up to date."));
}
