//! Loading progress bar and time formatting.

use crate::sync::LoadingState;

use crate::theme::ansi::{DARK_GRAY, GREEN, RESET};

/// Format seconds as `M:SS.s`.
///
/// Zero, negative and non-finite values render as `00:00.0`, the
/// placeholder shown before a time is known.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00.0".to_string();
    }
    // Round to tenths first so 59.96 becomes 1:00.0 rather than 0:60.0
    let tenths = (seconds * 10.0).round() as u64;
    let mins = tenths / 600;
    let rem = tenths % 600;
    format!("{}:{:02}.{}", mins, rem / 10, rem % 10)
}

/// Build the progress bar character array.
///
/// # Returns
/// A tuple of (bar_chars, filled_count)
pub fn build_progress_bar_chars(bar_width: usize, percent: f64) -> (Vec<char>, usize) {
    let fraction = if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (bar_width as f64 * fraction) as usize;

    let bar = (0..bar_width)
        .map(|i| if i < filled { '━' } else { '─' })
        .collect();
    (bar, filled)
}

/// Render the progress bar followed by the rounded percent.
pub fn render_progress_bar(bar_width: usize, percent: f64, color: bool) -> String {
    let (bar, filled) = build_progress_bar_chars(bar_width, percent);
    let percent_str = format!(" {:>3}%", percent.clamp(0.0, 100.0).round() as u64);

    let mut output = String::with_capacity(bar_width * 4 + 16);
    if color {
        output.push_str(GREEN);
    }
    for (i, c) in bar.iter().enumerate() {
        if color && i == filled {
            output.push_str(DARK_GRAY);
        }
        output.push(*c);
    }
    output.push_str(&percent_str);
    if color {
        output.push_str(RESET);
    }
    output
}

/// Label shown while a load is in flight.
pub fn loading_label(loading: &LoadingState) -> Option<String> {
    if !loading.is_loading || loading.progress_percent >= 100.0 {
        return None;
    }
    if loading.progress_percent == 0.0 {
        Some("Fetching video data...".to_string())
    } else {
        Some(format!(
            "Loading video... {}%",
            loading.progress_percent.round() as u64
        ))
    }
}
