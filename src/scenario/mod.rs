//! Scenario files: scripted surface/timeline traces.
//!
//! A scenario assigns a source and then lists steps. Each step is a
//! surface event, a timeline tick, a surface clock drift, a manual retry,
//! or an expectation about the controller after the previous step.
//!
//! ```toml
//! name = "network failure"
//! source = "https://cdn.example.com/clip.mp4"
//!
//! [[steps]]
//! event = "load_start"
//!
//! [[steps]]
//! event = "error"
//! code = 2
//!
//! [[steps]]
//! expect = { error = "network_failure", progress = 0.0 }
//! ```

mod expect;
mod runner;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sync::{SurfaceEvent, TimelineSignal};

pub use expect::{Expectation, ExpectationFailure};
pub use runner::{run_scenario, ReplayReport, StepReport};

/// Errors from loading a scenario file.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Scenario not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid scenario {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

fn default_media_task() -> bool {
    true
}

/// A scripted trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Source URL; absent means the preview renders nothing
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default = "default_media_task")]
    pub media_task: bool,
    /// Surface position before the first step
    #[serde(default)]
    pub surface_position: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Event(SurfaceEvent),
    Tick { tick: TimelineSignal },
    Advance { advance: f64 },
    Retry { retry: bool },
    Expect { expect: Expectation },
}

impl Step {
    /// Short description for replay output.
    pub fn describe(&self) -> String {
        match self {
            Step::Event(event) => event.label(),
            Step::Tick { tick } => {
                let time = tick
                    .current_time
                    .map(|t| format!("{:.2}", t))
                    .unwrap_or_else(|| "-".to_string());
                let state = if tick.is_playing { "playing" } else { "paused" };
                format!("tick {} {}", time, state)
            }
            Step::Advance { advance } => format!("advance {:+.2}s", advance),
            Step::Retry { .. } => "retry".to_string(),
            Step::Expect { .. } => "expect".to_string(),
        }
    }
}

impl Scenario {
    /// Parse TOML scenario text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse JSON scenario text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load a scenario file; `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        if !path.exists() {
            return Err(ScenarioError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json(&content).map_err(|e| e.to_string())
        } else {
            Self::from_toml(&content).map_err(|e| e.to_string())
        };

        let mut scenario = parsed.map_err(|message| ScenarioError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        if scenario.name.is_none() {
            scenario.name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        }
        Ok(scenario)
    }

    /// Display name, falling back to "scenario".
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("scenario")
    }
}
