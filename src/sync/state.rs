//! Controller state types
//!
//! The timeline signal is supplied from outside on every tick. Everything
//! else here is owned by the controller and mutated only in response to
//! surface events.

use serde::{Deserialize, Serialize};

use super::error::MediaErrorKind;

/// One tick of the external timeline clock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineSignal {
    /// Required playback position in seconds; `None` when the timeline has
    /// no position yet
    pub current_time: Option<f64>,
    /// Whether the timeline is playing
    #[serde(default)]
    pub is_playing: bool,
    /// Total timeline length in seconds
    #[serde(default)]
    pub total_duration: f64,
}

impl TimelineSignal {
    pub fn new(current_time: f64, is_playing: bool, total_duration: f64) -> Self {
        Self {
            current_time: Some(current_time),
            is_playing,
            total_duration,
        }
    }
}

/// Playback state of the video surface as last reported by its events.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlaybackState {
    /// Metadata is ready and commands may be issued
    pub is_loaded: bool,
    /// The surface reported `play` more recently than `pause`
    pub is_playing: bool,
    /// Video duration in seconds (0 until metadata is loaded)
    pub duration: f64,
    /// Terminal failure for the current source, if any
    pub error: Option<MediaErrorKind>,
}

/// Position in the load lifecycle.
///
/// `Idle(0) -> Loading(0..99) -> Ready(100)`, with `Failed(0)` reachable
/// from any state on an error event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading {
        progress: f64,
    },
    Ready,
    Failed,
}

impl LoadPhase {
    /// Progress percent reported for this phase.
    pub fn progress(&self) -> f64 {
        match self {
            LoadPhase::Idle | LoadPhase::Failed => 0.0,
            LoadPhase::Loading { progress } => *progress,
            LoadPhase::Ready => 100.0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading { .. })
    }

    /// Short lowercase name for display.
    pub fn name(&self) -> &'static str {
        match self {
            LoadPhase::Idle => "idle",
            LoadPhase::Loading { .. } => "loading",
            LoadPhase::Ready => "ready",
            LoadPhase::Failed => "failed",
        }
    }
}

/// Normalized loading flag and progress, as forwarded to observers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LoadingState {
    pub is_loading: bool,
    /// Percent in `[0, 100]`
    pub progress_percent: f64,
}

impl From<LoadPhase> for LoadingState {
    fn from(phase: LoadPhase) -> Self {
        Self {
            is_loading: phase.is_loading(),
            progress_percent: phase.progress(),
        }
    }
}

/// Read-only view of the controller used by rendering and reports.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PreviewSnapshot {
    /// False when there is no source or the task is not a media task
    pub active: bool,
    pub playback: PlaybackState,
    pub loading: LoadingState,
    /// Timeline position from the most recent tick
    pub current_time: Option<f64>,
    /// An error is showing and the caller may retry
    pub retry_available: bool,
}
