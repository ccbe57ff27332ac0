//! mediasync - keep a video surface in step with an external timeline
//!
//! The [`sync`] module holds the controller state machine. [`render`]
//! turns its snapshots into a text preview, and [`scenario`] replays
//! scripted event traces against it.

pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod scenario;
pub mod sync;
pub mod theme;

pub use config::Config;
pub use scenario::{run_scenario, ReplayReport, Scenario};
pub use sync::PlaybackSyncController;
