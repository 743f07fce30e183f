//! Sprint time-trial scorer.
//!
//! Each test name keys a fixed `{optimal, adequate}` threshold pair in
//! seconds (lower is better). Times at or under optimal score 100 (green);
//! between optimal and adequate they interpolate down through [85, 100)
//! (yellow); past adequate they fall from 70 in proportion to the overage
//! (red). Note the deliberate discontinuity at the adequate boundary: 85
//! from below, just under 70 from above.

use super::{mean, percentage_to_color, CategoryScore, Color};
use crate::error::FieldhouseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Seconds thresholds for one sprint test. Lower times are better.
#[derive(Debug, Clone, Copy)]
pub struct SprintThresholds {
    pub optimal: f64,
    pub adequate: f64,
}

/// Fixed threshold table keyed by test name.
///
/// New tests are added here, not in the scoring rule.
const THRESHOLDS: &[(&str, SprintThresholds)] = &[
    (
        "81 ft Sprint",
        SprintThresholds {
            optimal: 2.80,
            adequate: 3.00,
        },
    ),
    (
        "5-yard Directional - Left",
        SprintThresholds {
            optimal: 1.10,
            adequate: 1.25,
        },
    ),
    (
        "5-yard Directional - Center",
        SprintThresholds {
            optimal: 1.05,
            adequate: 1.20,
        },
    ),
    (
        "5-yard Directional - Right",
        SprintThresholds {
            optimal: 1.10,
            adequate: 1.25,
        },
    ),
    (
        "Curvilinear Sprint",
        SprintThresholds {
            optimal: 2.00,
            adequate: 2.20,
        },
    ),
];

/// Look up the threshold pair for a test name.
pub fn thresholds(test_name: &str) -> Option<SprintThresholds> {
    THRESHOLDS
        .iter()
        .find(|(name, _)| *name == test_name)
        .map(|(_, t)| *t)
}

/// Sprint test grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintCategory {
    Linear,
    Directional,
    Curvilinear,
}

impl SprintCategory {
    pub const ALL: [SprintCategory; 3] = [
        SprintCategory::Linear,
        SprintCategory::Directional,
        SprintCategory::Curvilinear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SprintCategory::Linear => "linear",
            SprintCategory::Directional => "directional",
            SprintCategory::Curvilinear => "curvilinear",
        }
    }
}

impl fmt::Display for SprintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SprintCategory {
    type Err = FieldhouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(SprintCategory::Linear),
            "directional" => Ok(SprintCategory::Directional),
            "curvilinear" => Ok(SprintCategory::Curvilinear),
            _ => Err(FieldhouseError::InvalidTestType {
                value: s.to_string(),
            }),
        }
    }
}

/// One scored sprint test with up to three recorded runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintResult {
    pub test_code: String,
    pub test_name: String,
    pub test_category: SprintCategory,
    pub runs: [Option<f64>; 3],
    pub best_time: Option<f64>,
    pub score_percentage: Option<f64>,
    pub color: Option<Color>,
}

impl SprintResult {
    /// Build a scored result from recorded run times.
    pub fn new(
        test_code: impl Into<String>,
        test_name: impl Into<String>,
        test_category: SprintCategory,
        runs: [Option<f64>; 3],
    ) -> Self {
        let test_name = test_name.into();
        let best = best_time(&runs);
        let (score_percentage, color) = match best {
            Some(time) => match score_result(&test_name, time) {
                Some((pct, color)) => (Some(pct), Some(color)),
                None => (None, None),
            },
            None => (None, None),
        };
        Self {
            test_code: test_code.into(),
            test_name,
            test_category,
            runs,
            best_time: best,
            score_percentage,
            color,
        }
    }

    /// Replace the run times and re-derive best time, score, and color.
    pub fn update_runs(&mut self, runs: [Option<f64>; 3]) {
        *self = SprintResult::new(
            std::mem::take(&mut self.test_code),
            std::mem::take(&mut self.test_name),
            self.test_category,
            runs,
        );
    }
}

/// Best (minimum) time among the recorded runs, ignoring missing trials.
pub fn best_time(runs: &[Option<f64>; 3]) -> Option<f64> {
    runs.iter()
        .flatten()
        .copied()
        .fold(None, |best: Option<f64>, t| match best {
            Some(b) if b <= t => Some(b),
            _ => Some(t),
        })
}

/// Score a sprint time against the test's threshold pair.
///
/// Returns `None` for test names with no threshold entry.
pub fn score_result(test_name: &str, time: f64) -> Option<(f64, Color)> {
    let t = thresholds(test_name)?;

    if time <= t.optimal {
        Some((100.0, Color::Green))
    } else if time <= t.adequate {
        let range = t.adequate - t.optimal;
        let from_optimal = time - t.optimal;
        let percentage = 85.0 + (1.0 - from_optimal / range) * 15.0;
        Some((percentage, Color::Yellow))
    } else {
        let overage = (time - t.adequate) / t.adequate;
        let percentage = (70.0 - overage * 100.0).max(0.0);
        Some((percentage, Color::Red))
    }
}

/// Average score per sprint category.
///
/// All three categories are always present; categories with no scoreable
/// result report `(None, None)`.
pub fn calculate_category_scores(
    results: &[SprintResult],
) -> BTreeMap<SprintCategory, CategoryScore> {
    let mut scores = BTreeMap::new();
    for category in SprintCategory::ALL {
        let percentages: Vec<f64> = results
            .iter()
            .filter(|r| r.test_category == category)
            .filter_map(|r| r.score_percentage)
            .collect();
        let entry = match mean(&percentages) {
            Some(avg) => CategoryScore {
                score: Some(avg),
                color: Some(percentage_to_color(avg, false)),
            },
            None => CategoryScore::empty(),
        };
        scores.insert(category, entry);
    }
    scores
}

/// Overall sprint score: mean of scored results. Empty input is (0, red).
pub fn calculate_overall_score(results: &[SprintResult]) -> (f64, Color) {
    let percentages: Vec<f64> = results.iter().filter_map(|r| r.score_percentage).collect();
    match mean(&percentages) {
        Some(avg) => (avg, percentage_to_color(avg, false)),
        None => (0.0, Color::Red),
    }
}

/// Left/right directional sprint comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalBalance {
    pub left_time: Option<f64>,
    pub right_time: Option<f64>,
    pub center_time: Option<f64>,
    pub imbalance_detected: bool,
    /// The slower side, when an imbalance is detected.
    pub imbalance_direction: Option<crate::cli::types::Side>,
    pub time_difference: Option<f64>,
}

/// Seconds of left/right difference treated as an imbalance.
const DIRECTIONAL_IMBALANCE_THRESHOLD: f64 = 0.1;

/// Compare the left and right 5-yard directional times.
///
/// Flags an imbalance when the sides differ by more than 0.1 s, naming the
/// slower side.
pub fn analyze_directional_balance(results: &[SprintResult]) -> DirectionalBalance {
    let time_of = |name: &str| {
        results
            .iter()
            .find(|r| r.test_name == name)
            .and_then(|r| r.best_time)
    };

    let left_time = time_of("5-yard Directional - Left");
    let right_time = time_of("5-yard Directional - Right");
    let center_time = time_of("5-yard Directional - Center");

    let mut balance = DirectionalBalance {
        left_time,
        right_time,
        center_time,
        imbalance_detected: false,
        imbalance_direction: None,
        time_difference: None,
    };

    if let (Some(left), Some(right)) = (left_time, right_time) {
        let diff = (left - right).abs();
        if diff > DIRECTIONAL_IMBALANCE_THRESHOLD {
            balance.imbalance_detected = true;
            balance.imbalance_direction = Some(if left > right {
                crate::cli::types::Side::Left
            } else {
                crate::cli::types::Side::Right
            });
            balance.time_difference = Some(diff);
        }
    }

    balance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::Side;

    fn sprint(code: &str, name: &str, category: SprintCategory, run: f64) -> SprintResult {
        SprintResult::new(code, name, category, [Some(run), None, None])
    }

    #[test]
    fn test_score_at_optimal_is_100_green() {
        let (pct, color) = score_result("81 ft Sprint", 2.80).unwrap();
        assert_eq!(pct, 100.0);
        assert_eq!(color, Color::Green);
    }

    #[test]
    fn test_score_below_optimal_is_100() {
        let (pct, _) = score_result("81 ft Sprint", 2.50).unwrap();
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn test_score_at_adequate_is_85_yellow() {
        let (pct, color) = score_result("81 ft Sprint", 3.00).unwrap();
        assert!((pct - 85.0).abs() < 1e-9);
        assert_eq!(color, Color::Yellow);
    }

    #[test]
    fn test_score_midband_interpolates() {
        // Halfway between 2.80 and 3.00 -> 85 + 7.5 = 92.5
        let (pct, color) = score_result("81 ft Sprint", 2.90).unwrap();
        assert!((pct - 92.5).abs() < 1e-9);
        assert_eq!(color, Color::Yellow);
    }

    #[test]
    fn test_discontinuity_just_past_adequate() {
        // Slightly over adequate drops to just under 70, not just under 85.
        let (pct, color) = score_result("81 ft Sprint", 3.001).unwrap();
        assert!(pct < 70.0);
        assert!(pct > 69.9);
        assert_eq!(color, Color::Red);
    }

    #[test]
    fn test_score_floor_at_zero() {
        let (pct, color) = score_result("81 ft Sprint", 10.0).unwrap();
        assert_eq!(pct, 0.0);
        assert_eq!(color, Color::Red);
    }

    #[test]
    fn test_unknown_test_name_unscored() {
        assert!(score_result("40-yard Dash", 4.5).is_none());
    }

    #[test]
    fn test_best_time_ignores_missing_runs() {
        assert_eq!(best_time(&[Some(2.9), None, Some(2.85)]), Some(2.85));
        assert_eq!(best_time(&[None, Some(3.1), None]), Some(3.1));
        assert_eq!(best_time(&[None, None, None]), None);
    }

    #[test]
    fn test_result_scores_best_of_three() {
        let result = SprintResult::new(
            "SPR-01",
            "81 ft Sprint",
            SprintCategory::Linear,
            [Some(3.05), Some(2.80), Some(2.95)],
        );
        assert_eq!(result.best_time, Some(2.80));
        assert_eq!(result.score_percentage, Some(100.0));
        assert_eq!(result.color, Some(Color::Green));
    }

    #[test]
    fn test_update_runs_rescores() {
        let mut result = sprint("SPR-01", "81 ft Sprint", SprintCategory::Linear, 2.80);
        assert_eq!(result.score_percentage, Some(100.0));
        result.update_runs([Some(3.20), None, None]);
        assert_eq!(result.best_time, Some(3.20));
        assert_eq!(result.color, Some(Color::Red));
        assert_eq!(result.test_name, "81 ft Sprint");
    }

    #[test]
    fn test_category_scores_report_all_categories() {
        let results = vec![
            sprint("SPR-01", "81 ft Sprint", SprintCategory::Linear, 2.80),
            sprint(
                "SPR-02",
                "5-yard Directional - Left",
                SprintCategory::Directional,
                1.10,
            ),
        ];
        let categories = calculate_category_scores(&results);
        assert_eq!(categories[&SprintCategory::Linear].score, Some(100.0));
        assert_eq!(categories[&SprintCategory::Directional].score, Some(100.0));
        assert_eq!(categories[&SprintCategory::Curvilinear], CategoryScore::empty());
    }

    #[test]
    fn test_overall_empty_is_zero_red() {
        assert_eq!(calculate_overall_score(&[]), (0.0, Color::Red));
    }

    #[test]
    fn test_directional_balance_flags_slower_side() {
        let results = vec![
            sprint(
                "SPR-02",
                "5-yard Directional - Left",
                SprintCategory::Directional,
                1.30,
            ),
            sprint(
                "SPR-04",
                "5-yard Directional - Right",
                SprintCategory::Directional,
                1.10,
            ),
        ];
        let balance = analyze_directional_balance(&results);
        assert!(balance.imbalance_detected);
        assert_eq!(balance.imbalance_direction, Some(Side::Left));
        assert!((balance.time_difference.unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_directional_balance_within_threshold() {
        let results = vec![
            sprint(
                "SPR-02",
                "5-yard Directional - Left",
                SprintCategory::Directional,
                1.20,
            ),
            sprint(
                "SPR-04",
                "5-yard Directional - Right",
                SprintCategory::Directional,
                1.12,
            ),
        ];
        let balance = analyze_directional_balance(&results);
        assert!(!balance.imbalance_detected);
        assert_eq!(balance.imbalance_direction, None);
    }

    #[test]
    fn test_directional_balance_missing_side() {
        let results = vec![sprint(
            "SPR-02",
            "5-yard Directional - Left",
            SprintCategory::Directional,
            1.20,
        )];
        let balance = analyze_directional_balance(&results);
        assert!(!balance.imbalance_detected);
        assert_eq!(balance.right_time, None);
    }
}
