//! OnBaseU categorical scorer (position players).
//!
//! Each test records a categorical label per side (or unsided); the label
//! maps to a 1-3 score and a color. Category and overall scores are the
//! earned fraction of the 3-points-per-test maximum, as a percentage.

use super::{percentage_to_color, result_to_score, score_to_color, CategoryScore, Color};
use crate::cli::types::Side;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scored categorical test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalResult {
    pub test_code: String,
    pub test_name: String,
    pub test_category: String,
    pub side: Option<Side>,
    pub result: String,
    pub score: u8,
    pub color: Color,
}

impl CategoricalResult {
    /// Build a scored result from a raw categorical label.
    pub fn new(
        test_code: impl Into<String>,
        test_name: impl Into<String>,
        test_category: impl Into<String>,
        side: Option<Side>,
        result: impl Into<String>,
    ) -> Self {
        let result = result.into();
        let (score, color) = score_result(&result);
        Self {
            test_code: test_code.into(),
            test_name: test_name.into(),
            test_category: test_category.into(),
            side,
            result,
            score,
            color,
        }
    }
}

/// Score a single categorical test result.
pub fn score_result(result: &str) -> (u8, Color) {
    let score = result_to_score(result);
    (score, score_to_color(score))
}

/// Average score for a set of results, as a percentage of the 3-per-test maximum.
///
/// Empty input scores 0.
pub fn calculate_category_score(results: &[&CategoricalResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: u32 = results.iter().map(|r| r.score as u32).sum();
    let max = results.len() as u32 * 3;
    f64::from(total) / f64::from(max) * 100.0
}

/// Overall assessment score and color across all results.
pub fn calculate_overall_score(results: &[CategoricalResult]) -> (f64, Color) {
    let refs: Vec<&CategoricalResult> = results.iter().collect();
    let percentage = calculate_category_score(&refs);
    (percentage, percentage_to_color(percentage, false))
}

/// Per-category score breakdown.
pub fn calculate_category_scores(results: &[CategoricalResult]) -> BTreeMap<String, CategoryScore> {
    let mut by_category: BTreeMap<String, Vec<&CategoricalResult>> = BTreeMap::new();
    for result in results {
        by_category
            .entry(result.test_category.clone())
            .or_default()
            .push(result);
    }

    by_category
        .into_iter()
        .map(|(category, group)| {
            let score = calculate_category_score(&group);
            (
                category,
                CategoryScore {
                    score: Some(score),
                    color: Some(percentage_to_color(score, false)),
                },
            )
        })
        .collect()
}

/// Whether left/right results of the same test disagree.
pub fn check_asymmetry(left_result: &str, right_result: &str) -> bool {
    result_to_score(left_result) != result_to_score(right_result)
}
