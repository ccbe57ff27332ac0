//! Playback sync controller
//!
//! Keeps a video surface's position and play state in step with an
//! external timeline, and turns the surface's load events into a
//! normalized loading state that is forwarded to a progress observer.
//!
//! All methods run to completion on the caller's thread. The only
//! asynchronous interaction is `play`, whose outcome arrives later as a
//! `Play` or `PlayRejected` event.

use crate::config::SyncConfig;

use super::error::MediaErrorKind;
use super::event::SurfaceEvent;
use super::observer::ProgressObserver;
use super::state::{LoadPhase, LoadingState, PlaybackState, PreviewSnapshot, TimelineSignal};
use super::surface::MediaSurface;

/// Outstanding play/pause command, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PendingCommand {
    #[default]
    None,
    Play,
    Pause,
    /// Last play request was refused; hold off until the timeline stops
    PlayRejected,
}

/// Source assignment for the surface.
#[derive(Debug, Clone, Default)]
struct MediaSource {
    url: Option<String>,
    is_media_task: bool,
}

impl MediaSource {
    fn active_url(&self) -> Option<&str> {
        if self.is_media_task {
            self.url.as_deref()
        } else {
            None
        }
    }
}

/// Reconciles a [`MediaSurface`] against a [`TimelineSignal`].
///
/// The surface is the single source of truth for `is_playing`: commands
/// are issued toward the timeline's state, but the internal flag only
/// changes when the surface reports `Play` or `Pause`.
pub struct PlaybackSyncController<S, O> {
    surface: S,
    observer: O,
    settings: SyncConfig,
    source: MediaSource,
    playback: PlaybackState,
    phase: LoadPhase,
    pending: PendingCommand,
    last_signal: Option<TimelineSignal>,
}

impl<S: MediaSurface, O: ProgressObserver> PlaybackSyncController<S, O> {
    /// Create an inactive controller. Call [`attach_source`](Self::attach_source)
    /// to start working.
    pub fn new(surface: S, observer: O, settings: SyncConfig) -> Self {
        Self {
            surface,
            observer,
            settings,
            source: MediaSource::default(),
            playback: PlaybackState::default(),
            phase: LoadPhase::Idle,
            pending: PendingCommand::None,
            last_signal: None,
        }
    }

    // === Accessors ===

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn loading(&self) -> LoadingState {
        self.phase.into()
    }

    /// True when a source is assigned and the task is a media task.
    pub fn is_active(&self) -> bool {
        self.source.active_url().is_some()
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        PreviewSnapshot {
            active: self.is_active(),
            playback: self.playback.clone(),
            loading: self.loading(),
            current_time: self.last_signal.and_then(|s| s.current_time),
            retry_available: self.is_active() && self.playback.error.is_some(),
        }
    }

    // === Source management ===

    /// Assign a new source. Restarts the lifecycle at `Idle`.
    ///
    /// Without a URL, or when the task is not a media task, the controller
    /// goes inactive and ignores ticks and events.
    pub fn attach_source(&mut self, url: Option<String>, is_media_task: bool) {
        self.source = MediaSource { url, is_media_task };
        self.playback = PlaybackState::default();
        self.pending = PendingCommand::None;
        self.transition(LoadPhase::Idle);

        if let Some(url) = self.source.active_url() {
            tracing::debug!(url, "attaching media source");
            self.surface.load(url);
        } else {
            tracing::debug!("no media source, controller inactive");
        }
    }

    /// Manual retry after a failure: re-attach the current source.
    ///
    /// Returns false when there is nothing to retry.
    pub fn retry(&mut self) -> bool {
        if !self.is_active() || self.playback.error.is_none() {
            return false;
        }
        tracing::info!("retrying media source");
        let url = self.source.url.clone();
        self.attach_source(url, true);
        true
    }

    // === Timeline reconciliation ===

    /// Handle one tick of the external timeline.
    pub fn on_timeline_tick(&mut self, signal: TimelineSignal) {
        if !self.is_active() {
            return;
        }
        self.last_signal = Some(signal);
        self.reconcile_position(&signal);
        self.reconcile_play_state(&signal);
    }

    /// Seek the surface when it has drifted beyond the tolerance band.
    ///
    /// Returns true if a seek was issued.
    pub fn reconcile_position(&mut self, signal: &TimelineSignal) -> bool {
        if !self.playback.is_loaded {
            return false;
        }
        let Some(target) = signal.current_time.filter(|t| t.is_finite()) else {
            return false;
        };

        let delta = (self.surface.position() - target).abs();
        if delta > self.settings.seek_tolerance_secs {
            tracing::debug!(target, delta, "seeking surface to timeline");
            self.surface.seek_to(target);
            true
        } else {
            false
        }
    }

    /// Issue play or pause so the surface follows the timeline.
    pub fn reconcile_play_state(&mut self, signal: &TimelineSignal) {
        if !self.playback.is_loaded {
            return;
        }

        match (signal.is_playing, self.playback.is_playing) {
            (true, false) => {
                if self.pending == PendingCommand::None || self.pending == PendingCommand::Pause {
                    tracing::debug!("requesting surface play");
                    self.surface.play();
                    self.pending = PendingCommand::Play;
                }
            }
            (false, true) => {
                if self.pending != PendingCommand::Pause {
                    tracing::debug!("pausing surface");
                    self.surface.pause();
                    self.pending = PendingCommand::Pause;
                }
            }
            (false, false) => {
                if self.pending == PendingCommand::PlayRejected {
                    self.pending = PendingCommand::None;
                }
            }
            (true, true) => {}
        }
    }

    // === Surface events ===

    /// Dispatch a surface event to its handler.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        if !self.is_active() {
            tracing::trace!(event = %event.label(), "ignoring event while inactive");
            return;
        }
        match event {
            SurfaceEvent::LoadStart => self.on_load_start(),
            SurfaceEvent::Progress {
                buffered_end,
                duration,
            } => self.on_buffer_progress(buffered_end, duration),
            SurfaceEvent::CanPlay => self.on_can_play(),
            SurfaceEvent::CanPlayThrough => self.on_can_play_through(),
            SurfaceEvent::LoadedMetadata { duration } => self.on_surface_loaded(duration),
            SurfaceEvent::LoadedData => tracing::debug!("surface loaded first frame"),
            SurfaceEvent::Error { code } => self.on_surface_error(code),
            SurfaceEvent::Play => self.on_play(),
            SurfaceEvent::Pause => self.on_pause(),
            SurfaceEvent::PlayRejected { reason } => self.on_play_rejected(&reason),
        }
    }

    /// A new load attempt began.
    pub fn on_load_start(&mut self) {
        tracing::debug!("surface load started");
        self.playback.is_loaded = false;
        self.playback.error = None;
        // Commands sent to the previous load are void
        self.pending = PendingCommand::None;
        self.transition(LoadPhase::Loading { progress: 0.0 });
    }

    /// Buffered data grew.
    ///
    /// Progress inferred from buffering is capped below 100: buffered
    /// ranges can be non-contiguous, so only the ready events may report
    /// a finished load.
    pub fn on_buffer_progress(&mut self, buffered_end: Option<f64>, duration: f64) {
        let Some(end) = buffered_end else {
            return;
        };
        if !duration.is_finite() || duration <= 0.0 || !end.is_finite() {
            return;
        }
        let progress = (end / duration * 100.0)
            .min(self.settings.buffering_progress_cap)
            .max(0.0);
        self.advance_progress(progress);
    }

    /// Playable, not necessarily fully buffered.
    pub fn on_can_play(&mut self) {
        self.advance_progress(self.settings.can_play_progress);
    }

    /// Playable to the end without stalling.
    pub fn on_can_play_through(&mut self) {
        if self.phase == LoadPhase::Failed {
            return;
        }
        self.transition(LoadPhase::Ready);
    }

    /// Metadata is ready: the surface accepts commands from now on.
    pub fn on_surface_loaded(&mut self, duration: f64) {
        self.playback.is_loaded = true;
        self.playback.duration = if duration.is_finite() { duration } else { 0.0 };
        self.playback.error = None;
        tracing::debug!(duration = self.playback.duration, "surface metadata loaded");
        self.transition(LoadPhase::Ready);

        // Becoming loaded re-runs reconciliation against the latest tick
        if let Some(signal) = self.last_signal {
            self.reconcile_position(&signal);
            self.reconcile_play_state(&signal);
        }
    }

    /// Loading failed. No automatic retry.
    pub fn on_surface_error(&mut self, code: Option<u16>) {
        let kind = MediaErrorKind::from_native_code(code);
        tracing::warn!(?code, error = %kind, "media surface error");
        self.playback.error = Some(kind);
        self.playback.is_loaded = false;
        self.pending = PendingCommand::None;
        self.transition(LoadPhase::Failed);
    }

    pub fn on_play(&mut self) {
        self.playback.is_playing = true;
        self.pending = PendingCommand::None;
    }

    pub fn on_pause(&mut self) {
        self.playback.is_playing = false;
        self.pending = PendingCommand::None;
    }

    /// A play command was refused. Not an error: `is_playing` simply stays
    /// false until the surface reports otherwise.
    pub fn on_play_rejected(&mut self, reason: &str) {
        tracing::warn!(reason, "video play failed");
        if self.pending == PendingCommand::Play {
            self.pending = PendingCommand::PlayRejected;
        }
    }

    // === Internals ===

    /// Raise progress within the current attempt; never lowers it.
    fn advance_progress(&mut self, progress: f64) {
        let next = match self.phase {
            LoadPhase::Failed | LoadPhase::Ready => return,
            LoadPhase::Idle => LoadPhase::Loading { progress },
            LoadPhase::Loading { progress: current } => LoadPhase::Loading {
                progress: current.max(progress),
            },
        };
        self.transition(next);
    }

    /// Move to `next`, notifying the observer only on an actual change.
    fn transition(&mut self, next: LoadPhase) {
        if next == self.phase {
            return;
        }
        tracing::trace!(from = self.phase.name(), to = next.name(), "load phase transition");
        self.phase = next;
        self.observer.on_progress_update(next.progress());
    }
}
