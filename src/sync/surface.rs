//! MediaSurface trait and the in-memory recording surface.

use serde::{Deserialize, Serialize};

/// A native video-rendering object the controller commands.
///
/// The controller never owns the surface's lifecycle: it issues commands
/// and is told about outcomes through [`SurfaceEvent`](super::SurfaceEvent)s.
/// `play` in particular is fire-and-forget; the surface later reports
/// either `Play` or `PlayRejected`.
pub trait MediaSurface {
    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Move the playback position.
    fn seek_to(&mut self, time: f64);

    /// Request playback to start. Completion arrives as an event.
    fn play(&mut self);

    /// Pause playback. Cannot fail.
    fn pause(&mut self);

    /// Begin loading a new source.
    fn load(&mut self, url: &str);
}

/// A command issued to a surface, as recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SurfaceCommand {
    Seek { to: f64 },
    Play,
    Pause,
    Load { url: String },
}

impl std::fmt::Display for SurfaceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceCommand::Seek { to } => write!(f, "seek({:.2})", to),
            SurfaceCommand::Play => write!(f, "play()"),
            SurfaceCommand::Pause => write!(f, "pause()"),
            SurfaceCommand::Load { url } => write!(f, "load({})", url),
        }
    }
}

/// In-memory surface that records every command it receives.
///
/// Seeks move the tracked position; [`advance`](Self::advance) simulates
/// the surface's own clock running. Used by scenario replay and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    position: f64,
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface starting at the given position.
    pub fn at(position: f64) -> Self {
        Self {
            position,
            commands: Vec::new(),
        }
    }

    /// Drift the surface clock forward (or backward for negative values).
    pub fn advance(&mut self, secs: f64) {
        self.position = (self.position + secs).max(0.0);
    }

    /// Set the position without recording a command.
    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    /// Commands recorded since the last call to `take_commands`.
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drain recorded commands.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl MediaSurface for RecordingSurface {
    fn position(&self) -> f64 {
        self.position
    }

    fn seek_to(&mut self, time: f64) {
        self.position = time;
        self.commands.push(SurfaceCommand::Seek { to: time });
    }

    fn play(&mut self) {
        self.commands.push(SurfaceCommand::Play);
    }

    fn pause(&mut self) {
        self.commands.push(SurfaceCommand::Pause);
    }

    fn load(&mut self, url: &str) {
        self.position = 0.0;
        self.commands.push(SurfaceCommand::Load {
            url: url.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_moves_position_and_records() {
        let mut surface = RecordingSurface::new();
        surface.seek_to(12.5);
        assert_eq!(surface.position(), 12.5);
        assert_eq!(surface.commands(), &[SurfaceCommand::Seek { to: 12.5 }]);
    }

    #[test]
    fn advance_never_goes_negative() {
        let mut surface = RecordingSurface::at(1.0);
        surface.advance(2.0);
        assert_eq!(surface.position(), 3.0);
        surface.advance(-10.0);
        assert_eq!(surface.position(), 0.0);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn take_commands_drains() {
        let mut surface = RecordingSurface::new();
        surface.play();
        surface.pause();
        assert_eq!(
            surface.take_commands(),
            vec![SurfaceCommand::Play, SurfaceCommand::Pause]
        );
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn load_resets_position() {
        let mut surface = RecordingSurface::at(30.0);
        surface.load("clip.mp4");
        assert_eq!(surface.position(), 0.0);
        assert_eq!(
            surface.commands(),
            &[SurfaceCommand::Load {
                url: "clip.mp4".to_string()
            }]
        );
    }

    #[test]
    fn command_display() {
        assert_eq!(SurfaceCommand::Seek { to: 10.2 }.to_string(), "seek(10.20)");
        assert_eq!(SurfaceCommand::Play.to_string(), "play()");
        assert_eq!(SurfaceCommand::Pause.to_string(), "pause()");
    }
}
