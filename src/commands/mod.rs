//! Subcommand handlers

pub mod check;
pub mod completions;
pub mod config;
pub mod replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mediasync::Config;

/// Config file path: `--config` when given, else the default location.
pub fn config_path(config_override: Option<&Path>) -> Result<PathBuf> {
    match config_override {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path().context("Could not resolve config path"),
    }
}

/// Load the effective configuration.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let path = config_path(config_override)?;
    Config::load_from(&path).with_context(|| format!("Failed to load config {}", path.display()))
}
