//! End-to-end scoring tests across the per-assessment scorers and the
//! session aggregator

use fieldhouse::{
    cli::types::{Handedness, Side},
    scoring::{
        kams::{KamsResult, KamsTestType},
        onbaseu::CategoricalResult,
        pitcher::analyze_throwing_arm_vs_glove_arm,
        power::PowerResult,
        session::{calculate_session_scores, SessionResults},
        sprint::{analyze_directional_balance, SprintCategory, SprintResult},
        Color,
    },
    AssessmentType,
};
use serde_json::{json, Map, Value};

fn categorical(code: &str, category: &str, side: Option<Side>, result: &str) -> CategoricalResult {
    CategoricalResult::new(code, format!("Test {code}"), category, side, result)
}

fn measurements(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn test_onbaseu_session_scores_by_category() {
    // mobility: 3 + 1 = 4 of 6 -> 66.67; stability: 2 of 3 -> 66.67
    let results = vec![
        categorical("OBU-01", "mobility", None, "Pass"),
        categorical("OBU-02", "mobility", None, "Limited"),
        categorical("OBU-03", "stability", None, "Neutral"),
    ];
    let scores = calculate_session_scores(&SessionResults::OnBaseU(results));

    let mobility = scores.categories.get("mobility").unwrap();
    assert!((mobility.score.unwrap() - 66.666).abs() < 0.01);
    assert_eq!(mobility.color, Some(Color::Red));

    // Overall: 6 of 9 -> 66.67, red (no blue for categorical screens)
    assert!((scores.overall - 66.666).abs() < 0.01);
    assert_eq!(scores.color, Color::Red);
}

#[test]
fn test_all_pass_session_is_green() {
    let results = vec![
        categorical("OBU-01", "mobility", None, "Pass"),
        categorical("OBU-02", "stability", None, "Good"),
    ];
    let scores = calculate_session_scores(&SessionResults::OnBaseU(results));
    assert_eq!(scores.overall, 100.0);
    assert_eq!(scores.color, Color::Green);
}

#[test]
fn test_unknown_categorical_label_scores_one() {
    let result = categorical("OBU-01", "mobility", None, "Inconclusive");
    assert_eq!(result.score, 1);
    assert_eq!(result.color, Color::Red);
}

#[test]
fn test_empty_sessions_are_zero_red_for_every_type() {
    for assessment_type in AssessmentType::ALL {
        let scores = calculate_session_scores(&SessionResults::empty(assessment_type));
        assert_eq!(scores.overall, 0.0, "{assessment_type}");
        assert_eq!(scores.color, Color::Red, "{assessment_type}");
    }
}

#[test]
fn test_pitcher_arm_balance_flags_large_gap() {
    // Right-handed pitcher: right-side screens are the throwing arm
    let results = vec![
        categorical("PIT-01", "mobility", Some(Side::Right), "Pass"),
        categorical("PIT-01", "mobility", Some(Side::Left), "Limited"),
    ];
    let balance = analyze_throwing_arm_vs_glove_arm(&results, Handedness::Right);
    assert_eq!(balance.throwing_arm_score, 100.0);
    assert!((balance.glove_arm_score - 33.333).abs() < 0.01);
    assert!(balance.imbalance_detected);

    // Same results, left-handed: arms swap
    let swapped = analyze_throwing_arm_vs_glove_arm(&results, Handedness::Left);
    assert!((swapped.throwing_arm_score - 33.333).abs() < 0.01);
    assert_eq!(swapped.glove_arm_score, 100.0);
}

#[test]
fn test_sprint_session_has_all_three_categories() {
    let results = vec![SprintResult::new(
        "SPR-01",
        "81 ft Sprint",
        SprintCategory::Linear,
        [Some(2.80), Some(3.1), None],
    )];
    let scores = calculate_session_scores(&SessionResults::Sprint(results));

    // Best run is at the optimal threshold
    assert_eq!(scores.overall, 100.0);
    assert_eq!(scores.color, Color::Green);

    // Unattempted categories are present but empty
    assert_eq!(scores.categories.len(), 3);
    let directional = scores.categories.get("directional").unwrap();
    assert_eq!(directional.score, None);
    assert_eq!(directional.color, None);
}

#[test]
fn test_directional_balance_names_slower_side() {
    let results = vec![
        SprintResult::new(
            "SPR-02",
            "5-yard Directional - Left",
            SprintCategory::Directional,
            [Some(1.30), None, None],
        ),
        SprintResult::new(
            "SPR-04",
            "5-yard Directional - Right",
            SprintCategory::Directional,
            [Some(1.10), None, None],
        ),
    ];
    let balance = analyze_directional_balance(&results);
    assert!(balance.imbalance_detected);
    assert_eq!(balance.imbalance_direction, Some(Side::Left));
    assert!((balance.time_difference.unwrap() - 0.2).abs() < 1e-9);
}

#[test]
fn test_power_session_mixes_absolute_and_relative() {
    let vertical_jump = Some(30.0);
    let results = vec![
        PowerResult::new("TPI-01", "Vertical Jump", 30.0, None, None),
        // Target = 30 * 0.85 = 25.5 -> 100%
        PowerResult::new("TPI-03", "Seated Chest Pass", 25.5, None, vertical_jump),
    ];
    let scores = calculate_session_scores(&SessionResults::TpiPower(results));
    assert_eq!(scores.overall, 100.0);
    assert_eq!(scores.color, Color::Blue);
}

#[test]
fn test_kams_session_overall_averages_tests() {
    let squat = KamsResult::new(
        KamsTestType::Squat,
        measurements(json!({
            "depth_score": 5.0,
            "knee_tracking": 5.0,
            "torso_angle": 5.0,
            "heel_rise": 5.0,
        })),
    );
    assert_eq!(squat.overall_score, Some(100.0));

    let balance = KamsResult::new(
        KamsTestType::Balance,
        measurements(json!({
            "time_left": 15.0,
            "time_right": 30.0,
        })),
    );
    // (50 + 100) / 2
    assert_eq!(balance.overall_score, Some(75.0));
    assert_eq!(balance.symmetry_score, Some(50.0));

    let scores = calculate_session_scores(&SessionResults::Kams(vec![squat, balance]));
    assert_eq!(scores.overall, 87.5);
    assert_eq!(scores.color, Color::Green);
}

#[test]
fn test_scoring_is_deterministic() {
    let build = || {
        let results = vec![
            categorical("OBU-01", "mobility", Some(Side::Left), "Pass"),
            categorical("OBU-01", "mobility", Some(Side::Right), "Limited"),
            categorical("OBU-02", "stability", None, "Neutral"),
        ];
        calculate_session_scores(&SessionResults::OnBaseU(results))
    };
    assert_eq!(build(), build());
}
