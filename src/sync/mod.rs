//! Video surface / timeline synchronization
//!
//! # Architecture
//!
//! - `controller`: [`PlaybackSyncController`], the reconciliation state machine
//! - `state`: timeline signal, playback and loading state, snapshots
//! - `event`: lifecycle events emitted by the surface
//! - `surface`: the [`MediaSurface`] command seam and a recording double
//! - `observer`: the [`ProgressObserver`] seam
//! - `error`: [`MediaErrorKind`] taxonomy and native code mapping
//!
//! # Usage
//!
//! ```
//! use mediasync::config::SyncConfig;
//! use mediasync::sync::{
//!     MediaSurface, PlaybackSyncController, ProgressLog, RecordingSurface, SurfaceEvent,
//!     TimelineSignal,
//! };
//!
//! let mut controller =
//!     PlaybackSyncController::new(RecordingSurface::new(), ProgressLog::new(), SyncConfig::default());
//! controller.attach_source(Some("clip.mp4".to_string()), true);
//! controller.handle_event(SurfaceEvent::LoadedMetadata { duration: 60.0 });
//! controller.on_timeline_tick(TimelineSignal::new(12.0, false, 60.0));
//!
//! assert_eq!(controller.surface().position(), 12.0);
//! ```

mod controller;
mod error;
mod event;
mod observer;
mod state;
mod surface;

pub use controller::PlaybackSyncController;
pub use error::{
    MediaErrorKind, NATIVE_ERR_ABORTED, NATIVE_ERR_DECODE, NATIVE_ERR_NETWORK,
    NATIVE_ERR_SRC_NOT_SUPPORTED,
};
pub use event::SurfaceEvent;
pub use observer::{ProgressLog, ProgressObserver};
pub use state::{LoadPhase, LoadingState, PlaybackState, PreviewSnapshot, TimelineSignal};
pub use surface::{MediaSurface, RecordingSurface, SurfaceCommand};
