//! Pitcher OnBaseU categorical scorer.
//!
//! Shares the categorical scoring rules with [`super::onbaseu`] and adds a
//! throwing-arm vs glove-arm balance analysis keyed off the pitcher's
//! handedness.

pub use super::onbaseu::{
    calculate_category_score, calculate_category_scores, calculate_overall_score, check_asymmetry,
    score_result, CategoricalResult,
};
use crate::cli::types::Handedness;
use serde::{Deserialize, Serialize};

/// Imbalance threshold in percentage points between the two arms.
const ARM_IMBALANCE_THRESHOLD: f64 = 15.0;

/// Comparison of a pitcher's throwing arm against the glove arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmBalance {
    pub throwing_arm_score: f64,
    pub glove_arm_score: f64,
    pub difference: f64,
    pub imbalance_detected: bool,
}

/// Analyze scoring differences between throwing arm and glove arm.
///
/// Sided results are grouped by arm, each arm gets a category score, and an
/// imbalance is flagged when the absolute difference exceeds 15 percentage
/// points. Unsided results are ignored.
pub fn analyze_throwing_arm_vs_glove_arm(
    results: &[CategoricalResult],
    throws: Handedness,
) -> ArmBalance {
    let throwing_arm = throws.throwing_arm();
    let glove_arm = throws.glove_arm();

    let throwing_results: Vec<&CategoricalResult> = results
        .iter()
        .filter(|r| r.side == Some(throwing_arm))
        .collect();
    let glove_results: Vec<&CategoricalResult> = results
        .iter()
        .filter(|r| r.side == Some(glove_arm))
        .collect();

    let throwing_avg = calculate_category_score(&throwing_results);
    let glove_avg = calculate_category_score(&glove_results);
    let difference = (throwing_avg - glove_avg).abs();

    ArmBalance {
        throwing_arm_score: throwing_avg,
        glove_arm_score: glove_avg,
        difference,
        imbalance_detected: difference > ARM_IMBALANCE_THRESHOLD,
    }
}
