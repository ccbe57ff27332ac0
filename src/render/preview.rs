//! Text projection of a controller snapshot.

use std::io::Write;

use anyhow::Result;

use crate::sync::PreviewSnapshot;

use super::progress::{format_timestamp, loading_label, render_progress_bar};
use crate::theme::ansi::{DARK_GRAY, RED, RESET, WHITE, YELLOW};

/// Narrowest preview we lay out.
pub const MIN_PREVIEW_WIDTH: usize = 16;

/// Columns reserved after the bar for the percent display.
const PERCENT_COLUMNS: usize = 5;

/// One-line playback status.
pub fn status_line(snapshot: &PreviewSnapshot) -> String {
    if let Some(error) = snapshot.playback.error {
        if snapshot.retry_available {
            format!("✖ {} (retry available)", error.message())
        } else {
            format!("✖ {}", error.message())
        }
    } else if !snapshot.playback.is_loaded {
        "○ waiting for video".to_string()
    } else if snapshot.playback.is_playing {
        "▶ playing".to_string()
    } else {
        "⏸ paused".to_string()
    }
}

/// Current position and video duration, `M:SS.s / M:SS.s`.
pub fn time_line(snapshot: &PreviewSnapshot) -> String {
    format!(
        "{} / {}",
        format_timestamp(snapshot.current_time.unwrap_or(0.0)),
        format_timestamp(snapshot.playback.duration)
    )
}

/// Lay out the preview as lines.
///
/// Returns `None` for an inactive controller, which renders nothing.
pub fn render_preview(snapshot: &PreviewSnapshot, width: usize, color: bool) -> Option<Vec<String>> {
    if !snapshot.active {
        return None;
    }

    let width = width.max(MIN_PREVIEW_WIDTH);
    let loading = &snapshot.loading;
    let mut lines = Vec::with_capacity(4);

    if loading.is_loading || loading.progress_percent < 100.0 {
        lines.push(render_progress_bar(
            width - PERCENT_COLUMNS,
            loading.progress_percent,
            color,
        ));
    }

    if let Some(label) = loading_label(loading) {
        lines.push(paint(&label, YELLOW, color));
    }

    let status = status_line(snapshot);
    let status_color = if snapshot.playback.error.is_some() {
        RED
    } else {
        WHITE
    };
    lines.push(paint(&status, status_color, color));

    lines.push(paint(&time_line(snapshot), DARK_GRAY, color));

    Some(lines)
}

/// Write the rendered preview, if any.
pub fn write_preview<W: Write>(
    out: &mut W,
    snapshot: &PreviewSnapshot,
    width: usize,
    color: bool,
) -> Result<()> {
    if let Some(lines) = render_preview(snapshot, width, color) {
        for line in lines {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}
