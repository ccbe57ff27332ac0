//! Rendering for the video preview.
//!
//! Rendering is a pure projection of a [`PreviewSnapshot`](crate::sync::PreviewSnapshot):
//! nothing here touches the controller or the surface.

mod preview;
mod progress;

pub use preview::{render_preview, status_line, time_line, write_preview, MIN_PREVIEW_WIDTH};
pub use progress::{build_progress_bar_chars, format_timestamp, loading_label, render_progress_bar};
