//! Check command handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use rayon::prelude::*;

use mediasync::config::SyncConfig;
use mediasync::scenario::{run_scenario, ReplayReport, Scenario, ScenarioError};
use mediasync::theme::{current_theme, Theme};

/// Result of checking one file.
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ReplayReport, ScenarioError>,
}

impl FileOutcome {
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(report) if report.passed())
    }
}

/// Load and run every file in parallel. Output order follows input order.
pub fn check_files(files: &[PathBuf], settings: &SyncConfig) -> Vec<FileOutcome> {
    files
        .par_iter()
        .map(|path| FileOutcome {
            path: path.clone(),
            result: Scenario::load(path).map(|scenario| run_scenario(&scenario, settings)),
        })
        .collect()
}

/// Format one outcome as output lines.
pub fn outcome_lines(outcome: &FileOutcome, theme: &Theme) -> Vec<String> {
    let path = display_path(&outcome.path);
    match &outcome.result {
        Ok(report) if report.passed() => vec![format!(
            "{} {} ({})",
            theme.success_text("PASS"),
            report.name,
            path
        )],
        Ok(report) => {
            let mut lines = vec![format!(
                "{} {} ({})",
                theme.error_text("FAIL"),
                report.name,
                path
            )];
            lines.extend(
                report
                    .failures
                    .iter()
                    .map(|f| format!("  {}", theme.secondary_text(&f.to_string()))),
            );
            lines
        }
        Err(e) => vec![format!("{} {}", theme.error_text("ERROR"), e)],
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Check scenario files and print a verdict for each.
pub fn handle(files: &[PathBuf], settings: &SyncConfig) -> Result<()> {
    let theme = current_theme();
    let outcomes = check_files(files, settings);

    for outcome in &outcomes {
        for line in outcome_lines(outcome, &theme) {
            println!("{}", line);
        }
    }

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    let passed = outcomes.len() - failed;
    println!();
    println!(
        "{}",
        theme.primary_text(&format!("{} passed, {} failed", passed, failed))
    );

    if failed > 0 {
        bail!("{} of {} scenario(s) failed", failed, outcomes.len());
    }
    Ok(())
}
