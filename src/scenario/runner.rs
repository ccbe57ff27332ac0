//! Replays a scenario through a controller backed by a recording surface.

use serde::Serialize;

use crate::config::SyncConfig;
use crate::sync::{
    MediaSurface, PlaybackSyncController, PreviewSnapshot, ProgressLog, RecordingSurface,
    SurfaceCommand,
};

use super::expect::{ExpectationFailure, Observed};
use super::{Scenario, Step};

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// 1-based step index
    pub index: usize,
    pub action: String,
    pub commands: Vec<SurfaceCommand>,
    pub notified: Vec<f64>,
    pub surface_position: f64,
    pub snapshot: PreviewSnapshot,
}

impl StepReport {
    /// One-line summary: action, then issued commands and notifications.
    pub fn summary(&self) -> String {
        let mut details: Vec<String> = self.commands.iter().map(ToString::to_string).collect();
        details.extend(self.notified.iter().map(|p| format!("notify({})", p)));
        if details.is_empty() {
            format!("{:>3}  {}", self.index, self.action)
        } else {
            format!("{:>3}  {:<28} {}", self.index, self.action, details.join(" "))
        }
    }
}

/// Full replay result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    pub failures: Vec<ExpectationFailure>,
    pub final_snapshot: PreviewSnapshot,
}

impl ReplayReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of expectation steps in the scenario.
    pub fn expectation_count(&self) -> usize {
        self.steps.iter().filter(|s| s.action == "expect").count()
    }
}

/// Run every step and collect the report.
///
/// Expectations compare against the state after the previous step and
/// the commands/notifications that step produced. Failures are recorded
/// and replay continues.
pub fn run_scenario(scenario: &Scenario, settings: &SyncConfig) -> ReplayReport {
    let mut controller = PlaybackSyncController::new(
        RecordingSurface::at(scenario.surface_position),
        ProgressLog::new(),
        settings.clone(),
    );
    controller.attach_source(scenario.source.clone(), scenario.media_task);
    // Source attachment is setup, not a step
    controller.surface_mut().take_commands();
    controller.observer_mut().take();
    if controller.is_active() {
        controller
            .surface_mut()
            .set_position(scenario.surface_position);
    }

    let mut steps = Vec::with_capacity(scenario.steps.len());
    let mut failures = Vec::new();
    let mut last_commands: Vec<SurfaceCommand> = Vec::new();
    let mut last_notified: Vec<f64> = Vec::new();

    for (i, step) in scenario.steps.iter().enumerate() {
        let index = i + 1;
        tracing::debug!(index, step = %step.describe(), "replaying step");

        match step {
            Step::Event(event) => controller.handle_event(event.clone()),
            Step::Tick { tick } => controller.on_timeline_tick(*tick),
            Step::Advance { advance } => controller.surface_mut().advance(*advance),
            Step::Retry { retry } => {
                if *retry && !controller.retry() {
                    tracing::info!(index, "retry requested but nothing to retry");
                }
            }
            Step::Expect { expect } => {
                let snapshot = controller.snapshot();
                let observed = Observed {
                    snapshot: &snapshot,
                    surface_position: controller.surface().position(),
                    commands: &last_commands,
                    notified: &last_notified,
                };
                failures.extend(expect.check(index, &observed));
            }
        }

        let (commands, notified) = if matches!(step, Step::Expect { .. }) {
            (Vec::new(), Vec::new())
        } else {
            last_commands = controller.surface_mut().take_commands();
            last_notified = controller.observer_mut().take();
            (last_commands.clone(), last_notified.clone())
        };

        steps.push(StepReport {
            index,
            action: step.describe(),
            commands,
            notified,
            surface_position: controller.surface().position(),
            snapshot: controller.snapshot(),
        });
    }

    ReplayReport {
        name: scenario.display_name().to_string(),
        steps,
        failures,
        final_snapshot: controller.snapshot(),
    }
}
