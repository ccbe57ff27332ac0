//! Expectations checked during replay.

use serde::{Deserialize, Serialize};

use crate::sync::{PreviewSnapshot, SurfaceCommand};

/// Tolerance for float comparisons.
const EPSILON: f64 = 1e-6;

/// Assertions about the controller after the preceding step.
///
/// Every field is optional; only the given ones are checked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    pub progress: Option<f64>,
    pub is_loading: Option<bool>,
    pub is_loaded: Option<bool>,
    pub is_playing: Option<bool>,
    /// Error kind identifier, or `"none"`
    pub error: Option<String>,
    pub surface_position: Option<f64>,
    /// Commands issued by the preceding step, in order
    pub commands: Option<Vec<SurfaceCommand>>,
    /// Observer notifications from the preceding step, in order
    pub notified: Option<Vec<f64>>,
}

/// A failed expectation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectationFailure {
    /// 1-based step index of the expectation
    pub step: usize,
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for ExpectationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "step {}: {} expected {}, got {}",
            self.step, self.field, self.expected, self.actual
        )
    }
}

/// What the expectation is compared against.
pub(crate) struct Observed<'a> {
    pub snapshot: &'a PreviewSnapshot,
    pub surface_position: f64,
    pub commands: &'a [SurfaceCommand],
    pub notified: &'a [f64],
}

impl Expectation {
    /// Compare against observed state, collecting every mismatch.
    pub(crate) fn check(&self, step: usize, observed: &Observed<'_>) -> Vec<ExpectationFailure> {
        let mut failures = Vec::new();
        let mut fail = |field: &'static str, expected: String, actual: String| {
            failures.push(ExpectationFailure {
                step,
                field,
                expected,
                actual,
            });
        };

        let snapshot = observed.snapshot;

        if let Some(expected) = self.progress {
            let actual = snapshot.loading.progress_percent;
            if !approx_eq(expected, actual) {
                fail("progress", expected.to_string(), actual.to_string());
            }
        }
        check_bool(&mut fail, "is_loading", self.is_loading, snapshot.loading.is_loading);
        check_bool(&mut fail, "is_loaded", self.is_loaded, snapshot.playback.is_loaded);
        check_bool(&mut fail, "is_playing", self.is_playing, snapshot.playback.is_playing);

        if let Some(expected) = &self.error {
            let actual = snapshot
                .playback
                .error
                .map(|kind| kind.as_str())
                .unwrap_or("none");
            if expected != actual {
                fail("error", expected.clone(), actual.to_string());
            }
        }

        if let Some(expected) = self.surface_position {
            if !approx_eq(expected, observed.surface_position) {
                fail(
                    "surface_position",
                    expected.to_string(),
                    observed.surface_position.to_string(),
                );
            }
        }

        if let Some(expected) = &self.commands {
            if !commands_match(expected, observed.commands) {
                fail(
                    "commands",
                    format_commands(expected),
                    format_commands(observed.commands),
                );
            }
        }

        if let Some(expected) = &self.notified {
            let matches = expected.len() == observed.notified.len()
                && expected
                    .iter()
                    .zip(observed.notified)
                    .all(|(a, b)| approx_eq(*a, *b));
            if !matches {
                fail(
                    "notified",
                    format!("{:?}", expected),
                    format!("{:?}", observed.notified),
                );
            }
        }

        failures
    }
}

fn check_bool(
    fail: &mut impl FnMut(&'static str, String, String),
    field: &'static str,
    expected: Option<bool>,
    actual: bool,
) {
    if let Some(expected) = expected {
        if expected != actual {
            fail(field, expected.to_string(), actual.to_string());
        }
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn commands_match(expected: &[SurfaceCommand], actual: &[SurfaceCommand]) -> bool {
    expected.len() == actual.len()
        && expected.iter().zip(actual).all(|pair| match pair {
            (SurfaceCommand::Seek { to: a }, SurfaceCommand::Seek { to: b }) => approx_eq(*a, *b),
            (a, b) => a == b,
        })
}

fn format_commands(commands: &[SurfaceCommand]) -> String {
    if commands.is_empty() {
        return "[]".to_string();
    }
    let parts: Vec<String> = commands.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
