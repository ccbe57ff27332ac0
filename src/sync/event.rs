//! Lifecycle events emitted by a media surface.

use serde::{Deserialize, Serialize};

/// An event reported by the media surface.
///
/// Serialized with an `event` tag so scenario files can write
/// `event = "progress"` alongside the variant's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Fetching of a new source began
    LoadStart,
    /// Buffered data grew; `buffered_end` is the end of the last buffered
    /// range, absent when nothing is buffered
    Progress {
        #[serde(default)]
        buffered_end: Option<f64>,
        duration: f64,
    },
    /// Enough data to start playing
    CanPlay,
    /// Enough data to play to the end without stalling
    CanPlayThrough,
    /// Metadata (including duration) is ready
    LoadedMetadata { duration: f64 },
    /// First frame is available
    LoadedData,
    /// Loading failed; `code` is the native error code when one is attached
    Error {
        #[serde(default)]
        code: Option<u16>,
    },
    /// Playback started
    Play,
    /// Playback paused
    Pause,
    /// A play command was refused (e.g. autoplay policy)
    PlayRejected {
        #[serde(default)]
        reason: String,
    },
}

impl SurfaceEvent {
    /// Short label for logs and replay output.
    pub fn label(&self) -> String {
        match self {
            SurfaceEvent::LoadStart => "load_start".to_string(),
            SurfaceEvent::Progress {
                buffered_end,
                duration,
            } => match buffered_end {
                Some(end) => format!("progress {:.1}/{:.1}", end, duration),
                None => format!("progress -/{:.1}", duration),
            },
            SurfaceEvent::CanPlay => "can_play".to_string(),
            SurfaceEvent::CanPlayThrough => "can_play_through".to_string(),
            SurfaceEvent::LoadedMetadata { duration } => {
                format!("loaded_metadata {:.1}s", duration)
            }
            SurfaceEvent::LoadedData => "loaded_data".to_string(),
            SurfaceEvent::Error { code: Some(code) } => format!("error code={}", code),
            SurfaceEvent::Error { code: None } => "error".to_string(),
            SurfaceEvent::Play => "play".to_string(),
            SurfaceEvent::Pause => "pause".to_string(),
            SurfaceEvent::PlayRejected { .. } => "play_rejected".to_string(),
        }
    }
}
