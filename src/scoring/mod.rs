//! Assessment scoring engine
//!
//! This module contains the shared scoring primitives and the five
//! per-assessment scorers, organized into logical components:
//! - `onbaseu` / `pitcher`: categorical bilateral scorers
//! - `sprint`: time-trial scorer with fixed threshold tables
//! - `power`: absolute and vertical-jump-relative power scorer
//! - `kams`: composite multi-field movement screen scorer
//! - `session`: per-session aggregation across a battery's results
//! - `catalog`: fixed test definition tables
//!
//! All scoring functions are pure: the same raw input always produces the
//! same `(score, color)` output, and unscoreable input yields `None`
//! sentinels rather than errors.

pub mod catalog;
pub mod kams;
pub mod onbaseu;
pub mod pitcher;
pub mod power;
pub mod session;
pub mod sprint;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal color grade layered over a numeric score: red < yellow < green < blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Yellow,
    Red,
    Blue,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categorical result labels and their 1-3 scores.
///
/// Unknown labels score 1: an unrecognized result is treated as the lowest
/// grade rather than rejected, so scoring stays total over free-text input.
const RESULT_TO_SCORE: &[(&str, u8)] = &[
    ("Pass", 3),
    ("Good", 3),
    ("> 45°", 3),
    ("Neutral", 2),
    ("= 45°", 2),
    ("Improves with Holding", 2),
    ("Limited", 1),
    ("< 45°", 1),
    ("Short", 1),
    ("No Change", 1),
    ("Fail", 1),
];

/// Convert a categorical result label to a numeric score (1-3).
pub fn result_to_score(result: &str) -> u8 {
    RESULT_TO_SCORE
        .iter()
        .find(|(label, _)| *label == result)
        .map(|(_, score)| *score)
        .unwrap_or(1)
}

/// Convert a 1-3 categorical score to a color. This path never yields blue.
pub fn score_to_color(score: u8) -> Color {
    if score >= 3 {
        Color::Green
    } else if score >= 2 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Convert a 0-100 percentage to a color.
///
/// Blue marks an at-or-above-ceiling result and is only reachable when
/// `include_blue` is set; `percentage_to_color(100.0, false)` is green.
pub fn percentage_to_color(percentage: f64, include_blue: bool) -> Color {
    if include_blue && percentage >= 100.0 {
        Color::Blue
    } else if percentage >= 85.0 {
        Color::Green
    } else if percentage >= 70.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// A category's aggregate score and color within one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: Option<f64>,
    pub color: Option<Color>,
}

impl CategoryScore {
    pub fn empty() -> Self {
        Self {
            score: None,
            color: None,
        }
    }
}

/// Mean of a slice of percentages; `None` when empty.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
