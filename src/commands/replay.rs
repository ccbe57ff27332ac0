//! Replay command handler

use std::io::{self, Write};

use anyhow::{bail, Context, Result};

use mediasync::cli::ReplayArgs;
use mediasync::render::write_preview;
use mediasync::scenario::{run_scenario, ReplayReport, Scenario};
use mediasync::theme::{color_enabled, current_theme};
use mediasync::Config;

/// Fallback preview width when stdout is not a terminal.
const DEFAULT_WIDTH: usize = 40;

/// Replay a scenario and print each step, the preview and the verdict.
pub fn handle(args: &ReplayArgs, config: &Config) -> Result<()> {
    let scenario = Scenario::load(&args.file)?;
    tracing::debug!(
        name = scenario.display_name(),
        steps = scenario.steps.len(),
        "replaying scenario"
    );
    let report = run_scenario(&scenario, &config.sync);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        writeln!(out, "{}", json)?;
    } else {
        let width = preview_width(args.width.or(config.render.width));
        let color = color_enabled() && !config.render.no_color;
        write_report(&mut out, &report, !args.no_preview, width, color)?;
    }
    out.flush()?;

    if !report.passed() {
        bail!(
            "{} expectation(s) failed in {}",
            report.failures.len(),
            report.name
        );
    }
    Ok(())
}

/// Explicit width, else the terminal's, else a fixed default.
fn preview_width(explicit: Option<u16>) -> usize {
    explicit
        .map(usize::from)
        .or_else(|| terminal_size::terminal_size().map(|(w, _)| w.0 as usize))
        .unwrap_or(DEFAULT_WIDTH)
}

/// Human-readable report.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ReplayReport,
    preview: bool,
    width: usize,
    color: bool,
) -> Result<()> {
    let theme = if color {
        current_theme()
    } else {
        mediasync::theme::Theme::plain()
    };

    writeln!(out, "{}", theme.primary_text(&format!("Scenario: {}", report.name)))?;
    for step in &report.steps {
        writeln!(out, "{}", step.summary())?;
    }

    if preview {
        writeln!(out)?;
        write_preview(out, &report.final_snapshot, width, color)?;
    }

    writeln!(out)?;
    if report.passed() {
        writeln!(
            out,
            "{}",
            theme.success_text(&format!(
                "PASS ({} expectation(s))",
                report.expectation_count()
            ))
        )?;
    } else {
        writeln!(out, "{}", theme.error_text("FAIL"))?;
        for failure in &report.failures {
            writeln!(out, "  {}", theme.error_text(&failure.to_string()))?;
        }
    }
    Ok(())
}
