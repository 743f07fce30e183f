//! KAMS composite movement-screen scorer.
//!
//! Each KAMS test records a map of named measurement fields rather than a
//! single value; every test type has its own arithmetic for turning those
//! fields into an overall score and (where the movement is lateralized) a
//! symmetry score. Quality sub-scores are on a 0-5 scale and convert to
//! percentages at x20.

use super::{mean, percentage_to_color, Color};
use crate::error::FieldhouseError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Left/right ROM field pairs used for the symmetry score.
const ROM_PAIRS: &[(&str, &str)] = &[
    ("hip_flexion_left", "hip_flexion_right"),
    ("hip_extension_left", "hip_extension_right"),
    ("hip_internal_rotation_left", "hip_internal_rotation_right"),
    ("hip_external_rotation_left", "hip_external_rotation_right"),
    ("ankle_dorsiflexion_left", "ankle_dorsiflexion_right"),
    ("shoulder_flexion_left", "shoulder_flexion_right"),
    ("shoulder_extension_left", "shoulder_extension_right"),
    ("thoracic_rotation_left", "thoracic_rotation_right"),
];

const SQUAT_COMPONENTS: &[&str] = &[
    "depth_score",
    "knee_tracking",
    "torso_angle",
    "arm_position",
    "heel_rise",
];

const LUNGE_LEFT_COMPONENTS: &[&str] = &[
    "depth_left",
    "knee_tracking_left",
    "balance_left",
    "overall_quality_left",
];

const LUNGE_RIGHT_COMPONENTS: &[&str] = &[
    "depth_right",
    "knee_tracking_right",
    "balance_right",
    "overall_quality_right",
];

const JUMP_COMPONENTS: &[&str] = &["landing_quality", "force_absorption"];
const JUMP_DEDUCTIONS: &[&str] = &["knee_valgus", "asymmetry"];

/// Single-leg balance hold treated as a perfect score, in seconds.
const BALANCE_CEILING_SECONDS: f64 = 30.0;

/// ROM overall score when the measurement map carries none.
///
/// ROM overall scoring is an open extension point: no absolute norm is
/// derived from the measured angles, the value is either supplied by the
/// caller (`overall_score` field) or defaults here.
const ROM_DEFAULT_OVERALL: f64 = 75.0;

/// The five KAMS test types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KamsTestType {
    Rom,
    Squat,
    Lunge,
    Balance,
    Jump,
}

impl KamsTestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KamsTestType::Rom => "rom",
            KamsTestType::Squat => "squat",
            KamsTestType::Lunge => "lunge",
            KamsTestType::Balance => "balance",
            KamsTestType::Jump => "jump",
        }
    }
}

impl fmt::Display for KamsTestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KamsTestType {
    type Err = FieldhouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rom" => Ok(KamsTestType::Rom),
            "squat" => Ok(KamsTestType::Squat),
            "lunge" => Ok(KamsTestType::Lunge),
            "balance" => Ok(KamsTestType::Balance),
            "jump" => Ok(KamsTestType::Jump),
            _ => Err(FieldhouseError::InvalidTestType {
                value: s.to_string(),
            }),
        }
    }
}

/// One scored KAMS test with its raw measurement map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KamsResult {
    pub test_type: KamsTestType,
    pub measurements: Map<String, Value>,
    pub overall_score: Option<f64>,
    pub symmetry_score: Option<f64>,
}

impl KamsResult {
    /// Build a scored result from a raw measurement map.
    pub fn new(test_type: KamsTestType, measurements: Map<String, Value>) -> Self {
        let (overall_score, symmetry_score) = score_result(test_type, &measurements);
        Self {
            test_type,
            measurements,
            overall_score,
            symmetry_score,
        }
    }
}

fn field(measurements: &Map<String, Value>, key: &str) -> Option<f64> {
    measurements.get(key).and_then(Value::as_f64)
}

/// Score a KAMS test: `(overall_score, symmetry_score)`, both percentages.
pub fn score_result(
    test_type: KamsTestType,
    measurements: &Map<String, Value>,
) -> (Option<f64>, Option<f64>) {
    match test_type {
        KamsTestType::Rom => score_rom(measurements),
        KamsTestType::Squat => score_squat(measurements),
        KamsTestType::Lunge => score_lunge(measurements),
        KamsTestType::Balance => score_balance(measurements),
        KamsTestType::Jump => score_jump(measurements),
    }
}

/// Symmetry of a left/right pair: min/max as a percentage.
fn pair_symmetry(left: f64, right: f64) -> Option<f64> {
    let max = left.max(right);
    if max > 0.0 {
        Some(left.min(right) / max * 100.0)
    } else {
        None
    }
}

fn score_rom(measurements: &Map<String, Value>) -> (Option<f64>, Option<f64>) {
    let symmetries: Vec<f64> = ROM_PAIRS
        .iter()
        .filter_map(|(left_key, right_key)| {
            let left = field(measurements, left_key)?;
            let right = field(measurements, right_key)?;
            pair_symmetry(left, right)
        })
        .collect();

    let symmetry = mean(&symmetries);
    let overall = field(measurements, "overall_score").unwrap_or(ROM_DEFAULT_OVERALL);

    (Some(overall), symmetry)
}

fn score_squat(measurements: &Map<String, Value>) -> (Option<f64>, Option<f64>) {
    let components: Vec<f64> = SQUAT_COMPONENTS
        .iter()
        .filter_map(|key| field(measurements, key))
        .collect();

    let mut overall = match mean(&components) {
        Some(avg) => (avg * 20.0).min(100.0),
        None => 0.0,
    };

    // An explicit overall quality grade from the assessor wins
    if let Some(quality) = field(measurements, "overall_quality") {
        overall = quality * 20.0;
    }

    // Bilateral movement, no per-side symmetry
    (Some(overall), None)
}

fn score_lunge(measurements: &Map<String, Value>) -> (Option<f64>, Option<f64>) {
    let left: Vec<f64> = LUNGE_LEFT_COMPONENTS
        .iter()
        .filter_map(|key| field(measurements, key))
        .collect();
    let right: Vec<f64> = LUNGE_RIGHT_COMPONENTS
        .iter()
        .filter_map(|key| field(measurements, key))
        .collect();

    let left_avg = mean(&left).unwrap_or(0.0);
    let right_avg = mean(&right).unwrap_or(0.0);

    let overall = (left_avg + right_avg) / 2.0 * 20.0;
    let symmetry = if left_avg > 0.0 && right_avg > 0.0 {
        pair_symmetry(left_avg, right_avg)
    } else {
        None
    };

    (Some(overall), symmetry)
}

fn score_balance(measurements: &Map<String, Value>) -> (Option<f64>, Option<f64>) {
    let left_time = field(measurements, "time_left").unwrap_or(0.0);
    let right_time = field(measurements, "time_right").unwrap_or(0.0);

    let side_score = |time: f64| {
        if time > 0.0 {
            (time / BALANCE_CEILING_SECONDS * 100.0).min(100.0)
        } else {
            0.0
        }
    };

    let overall = (side_score(left_time) + side_score(right_time)) / 2.0;
    let symmetry = if left_time > 0.0 && right_time > 0.0 {
        pair_symmetry(left_time, right_time)
    } else {
        None
    };

    (Some(overall), symmetry)
}

fn score_jump(measurements: &Map<String, Value>) -> (Option<f64>, Option<f64>) {
    let mut score: f64 = 100.0;

    // Each quality component caps the score at its x20 percentage
    for key in JUMP_COMPONENTS {
        if let Some(val) = field(measurements, key) {
            score = score.min(val * 20.0);
        }
    }

    // Each deduction field removes 5 points per unit of severity
    for key in JUMP_DEDUCTIONS {
        if let Some(val) = field(measurements, key) {
            if val > 0.0 {
                score -= val * 5.0;
            }
        }
    }

    let overall = score.max(0.0);
    let asymmetry = field(measurements, "asymmetry").unwrap_or(0.0);
    let symmetry = (100.0 - asymmetry * 10.0).max(0.0);

    (Some(overall), Some(symmetry))
}

/// Overall KAMS assessment score: mean of the scored tests' overall scores.
/// Empty input is (0, red).
pub fn calculate_overall_assessment_score(results: &[KamsResult]) -> (f64, Color) {
    let scores: Vec<f64> = results.iter().filter_map(|r| r.overall_score).collect();
    match mean(&scores) {
        Some(avg) => (avg, percentage_to_color(avg, false)),
        None => (0.0, Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn measurements(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_rom_symmetry_equal_pair_is_100() {
        let m = measurements(json!({
            "hip_flexion_left": 120.0,
            "hip_flexion_right": 120.0,
        }));
        let (overall, symmetry) = score_result(KamsTestType::Rom, &m);
        assert_eq!(symmetry, Some(100.0));
        assert_eq!(overall, Some(75.0)); // pass-through default
    }

    #[test]
    fn test_rom_symmetry_half_pair_is_50() {
        let m = measurements(json!({
            "ankle_dorsiflexion_left": 10.0,
            "ankle_dorsiflexion_right": 20.0,
        }));
        let (_, symmetry) = score_result(KamsTestType::Rom, &m);
        assert_eq!(symmetry, Some(50.0));
    }

    #[test]
    fn test_rom_symmetry_averages_pairs() {
        let m = measurements(json!({
            "hip_flexion_left": 100.0,
            "hip_flexion_right": 100.0,
            "thoracic_rotation_left": 10.0,
            "thoracic_rotation_right": 20.0,
        }));
        let (_, symmetry) = score_result(KamsTestType::Rom, &m);
        assert_eq!(symmetry, Some(75.0));
    }

    #[test]
    fn test_rom_overall_override() {
        let m = measurements(json!({"overall_score": 92.0}));
        let (overall, symmetry) = score_result(KamsTestType::Rom, &m);
        assert_eq!(overall, Some(92.0));
        assert_eq!(symmetry, None);
    }

    #[test]
    fn test_squat_component_mean_times_20() {
        let m = measurements(json!({
            "depth_score": 4.0,
            "knee_tracking": 3.0,
            "torso_angle": 5.0,
        }));
        let (overall, symmetry) = score_result(KamsTestType::Squat, &m);
        assert_eq!(overall, Some(80.0));
        assert_eq!(symmetry, None);
    }

    #[test]
    fn test_squat_overall_quality_override_wins() {
        let m = measurements(json!({
            "depth_score": 5.0,
            "knee_tracking": 5.0,
            "overall_quality": 3.0,
        }));
        let (overall, _) = score_result(KamsTestType::Squat, &m);
        assert_eq!(overall, Some(60.0));
    }

    #[test]
    fn test_squat_no_fields_scores_zero() {
        let (overall, _) = score_result(KamsTestType::Squat, &Map::new());
        assert_eq!(overall, Some(0.0));
    }

    #[test]
    fn test_lunge_sides_and_symmetry() {
        let m = measurements(json!({
            "depth_left": 4.0,
            "balance_left": 4.0,
            "depth_right": 2.0,
            "balance_right": 2.0,
        }));
        let (overall, symmetry) = score_result(KamsTestType::Lunge, &m);
        // left avg 4, right avg 2 -> overall (4+2)/2*20 = 60
        assert_eq!(overall, Some(60.0));
        assert_eq!(symmetry, Some(50.0));
    }

    #[test]
    fn test_lunge_missing_side_no_symmetry() {
        let m = measurements(json!({"depth_left": 4.0}));
        let (overall, symmetry) = score_result(KamsTestType::Lunge, &m);
        assert_eq!(overall, Some(40.0));
        assert_eq!(symmetry, None);
    }

    #[test]
    fn test_balance_ceiling_at_30_seconds() {
        let m = measurements(json!({"time_left": 30.0, "time_right": 45.0}));
        let (overall, symmetry) = score_result(KamsTestType::Balance, &m);
        assert_eq!(overall, Some(100.0));
        // Symmetry uses raw times, not capped scores
        assert!((symmetry.unwrap() - 66.666_666).abs() < 0.001);
    }

    #[test]
    fn test_balance_partial_times() {
        let m = measurements(json!({"time_left": 15.0, "time_right": 30.0}));
        let (overall, symmetry) = score_result(KamsTestType::Balance, &m);
        assert_eq!(overall, Some(75.0));
        assert_eq!(symmetry, Some(50.0));
    }

    #[test]
    fn test_balance_one_leg_only() {
        let m = measurements(json!({"time_left": 30.0}));
        let (overall, symmetry) = score_result(KamsTestType::Balance, &m);
        assert_eq!(overall, Some(50.0));
        assert_eq!(symmetry, None);
    }

    #[test]
    fn test_jump_capped_by_components_and_deductions() {
        let m = measurements(json!({
            "landing_quality": 4.0,
            "force_absorption": 5.0,
            "knee_valgus": 2.0,
            "asymmetry": 1.0,
        }));
        let (overall, symmetry) = score_result(KamsTestType::Jump, &m);
        // capped at 4*20 = 80, minus 2*5 + 1*5 = 15 -> 65
        assert_eq!(overall, Some(65.0));
        assert_eq!(symmetry, Some(90.0));
    }

    #[test]
    fn test_jump_floors_at_zero() {
        let m = measurements(json!({
            "landing_quality": 1.0,
            "knee_valgus": 5.0,
        }));
        let (overall, _) = score_result(KamsTestType::Jump, &m);
        // 1*20 = 20, minus 25 -> floored at 0
        assert_eq!(overall, Some(0.0));
    }

    #[test]
    fn test_jump_clean_landing_full_marks() {
        let m = measurements(json!({
            "landing_quality": 5.0,
            "force_absorption": 5.0,
        }));
        let (overall, symmetry) = score_result(KamsTestType::Jump, &m);
        assert_eq!(overall, Some(100.0));
        assert_eq!(symmetry, Some(100.0));
    }

    #[test]
    fn test_overall_assessment_mean() {
        let results = vec![
            KamsResult::new(
                KamsTestType::Balance,
                measurements(json!({"time_left": 30.0, "time_right": 30.0})),
            ),
            KamsResult::new(
                KamsTestType::Squat,
                measurements(json!({"overall_quality": 3.0})),
            ),
        ];
        let (pct, color) = calculate_overall_assessment_score(&results);
        assert_eq!(pct, 80.0);
        assert_eq!(color, Color::Yellow);
    }

    #[test]
    fn test_overall_assessment_empty_is_zero_red() {
        assert_eq!(calculate_overall_assessment_score(&[]), (0.0, Color::Red));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let m = measurements(json!({
            "depth_left": 3.0,
            "depth_right": 4.0,
        }));
        assert_eq!(
            score_result(KamsTestType::Lunge, &m),
            score_result(KamsTestType::Lunge, &m)
        );
    }
}
