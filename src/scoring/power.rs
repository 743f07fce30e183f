//! TPI power scorer.
//!
//! Two absolute jump tests score against fixed yellow/green/blue bands with
//! linear interpolation between bands. The remaining tests score relative to
//! the session's vertical jump: the target is `vertical_jump * factor`, and
//! a relative test without a vertical jump on record is unscored rather than
//! an error.

use super::{mean, percentage_to_color, Color};
use crate::cli::types::Side;
use serde::{Deserialize, Serialize};

/// Test code of the vertical jump. Relative tests resolve their reference
/// value by looking this code up within the same session or batch.
pub const VERTICAL_JUMP_CODE: &str = "TPI-01";

/// Ascending score bands for an absolute jump test, in inches.
#[derive(Debug, Clone, Copy)]
pub struct JumpBands {
    pub yellow: f64,
    pub green: f64,
    pub blue: f64,
}

const JUMP_THRESHOLDS: &[(&str, JumpBands)] = &[
    (
        "Vertical Jump",
        JumpBands {
            yellow: 22.0,
            green: 26.0,
            blue: 30.0,
        },
    ),
    (
        "Broad Jump",
        JumpBands {
            yellow: 96.0,
            green: 108.0,
            blue: 114.0,
        },
    ),
];

/// Relative-test factors applied to the vertical jump to form the target.
const RELATIVE_FACTORS: &[(&str, f64)] = &[
    ("Seated Chest Pass", 0.85),
    ("Sit Up Throw", 0.85),
    ("Baseline Shot Put", 1.5),
];

/// Factor reduction for the non-dominant side of the shot put.
const OFF_SIDE_FACTOR: f64 = 0.9;

fn jump_bands(test_name: &str) -> Option<JumpBands> {
    JUMP_THRESHOLDS
        .iter()
        .find(|(name, _)| *name == test_name)
        .map(|(_, bands)| *bands)
}

fn relative_factor(test_name: &str) -> Option<f64> {
    RELATIVE_FACTORS
        .iter()
        .find(|(name, _)| *name == test_name)
        .map(|(_, factor)| *factor)
}

/// One scored power test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerResult {
    pub test_code: String,
    pub test_name: String,
    /// Measured value in inches.
    pub result_value: f64,
    pub side: Option<Side>,
    pub score_percentage: Option<f64>,
    pub color: Option<Color>,
}

impl PowerResult {
    /// Build a scored result. `vertical_jump` is the session's TPI-01 value,
    /// required for relative tests.
    pub fn new(
        test_code: impl Into<String>,
        test_name: impl Into<String>,
        result_value: f64,
        side: Option<Side>,
        vertical_jump: Option<f64>,
    ) -> Self {
        let test_name = test_name.into();
        let is_off_side = side == Some(Side::Left);
        let (score_percentage, color) =
            score_result(&test_name, result_value, vertical_jump, is_off_side);
        Self {
            test_code: test_code.into(),
            test_name,
            result_value,
            side,
            score_percentage,
            color,
        }
    }
}

/// Score a power test result.
///
/// Absolute tests need only the measured value; relative tests also need the
/// session's vertical jump and return `(None, None)` without one. Unknown
/// test names are unscored.
pub fn score_result(
    test_name: &str,
    value: f64,
    vertical_jump: Option<f64>,
    is_off_side: bool,
) -> (Option<f64>, Option<Color>) {
    if let Some(bands) = jump_bands(test_name) {
        let (pct, color) = score_jump(value, bands);
        return (Some(pct), Some(color));
    }
    if let Some(factor) = relative_factor(test_name) {
        let Some(vertical_jump) = vertical_jump else {
            return (None, None);
        };
        let (pct, color) = score_relative(test_name, value, vertical_jump, factor, is_off_side);
        return (Some(pct), Some(color));
    }
    (None, None)
}

/// Score an absolute jump test against its bands.
///
/// At/above blue is a flat 100; between bands the percentage interpolates
/// through [85, 100) and [70, 85); below yellow it falls proportionally
/// from 70.
fn score_jump(value: f64, bands: JumpBands) -> (f64, Color) {
    if value >= bands.blue {
        (100.0, Color::Blue)
    } else if value >= bands.green {
        let range = bands.blue - bands.green;
        let position = value - bands.green;
        (85.0 + (position / range) * 15.0, Color::Green)
    } else if value >= bands.yellow {
        let range = bands.green - bands.yellow;
        let position = value - bands.yellow;
        (70.0 + (position / range) * 15.0, Color::Yellow)
    } else {
        (((value / bands.yellow) * 70.0).max(0.0), Color::Red)
    }
}

/// Score a test relative to the vertical jump, capped at 100.
fn score_relative(
    test_name: &str,
    value: f64,
    vertical_jump: f64,
    mut factor: f64,
    is_off_side: bool,
) -> (f64, Color) {
    if is_off_side && test_name == "Baseline Shot Put" {
        factor *= OFF_SIDE_FACTOR;
    }

    let target = vertical_jump * factor;
    let percentage = if target > 0.0 {
        ((value / target) * 100.0).min(100.0)
    } else {
        0.0
    };

    (percentage, percentage_to_color(percentage, true))
}

/// Overall power score: mean of scored results, colored with blue enabled.
/// Empty input is (0, red).
pub fn calculate_overall_score(results: &[PowerResult]) -> (f64, Color) {
    let percentages: Vec<f64> = results.iter().filter_map(|r| r.score_percentage).collect();
    match mean(&percentages) {
        Some(avg) => (avg, percentage_to_color(avg, true)),
        None => (0.0, Color::Red),
    }
}

/// Find the vertical jump value within a batch of raw `(test_code, value)`
/// entries, for scoring relative tests recorded in the same batch.
pub fn batch_vertical_jump(entries: &[(String, f64)]) -> Option<f64> {
    entries
        .iter()
        .find(|(code, _)| code == VERTICAL_JUMP_CODE)
        .map(|(_, value)| *value)
}
