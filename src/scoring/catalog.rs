//! Fixed test definition tables for every assessment battery.
//!
//! Test codes are stable identifiers: intake keys results by them and the
//! power scorer resolves the session's vertical jump through `TPI-01`.

use super::sprint::SprintCategory;
use crate::cli::types::AssessmentType;
use serde::Serialize;

/// A single measured test definition within a battery.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TestDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
}

/// A categorical screen definition within an OnBaseU battery.
///
/// Bilateral screens are administered once per side; `options` lists the
/// labels the screen is graded with.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoricalTestDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub is_bilateral: bool,
    pub options: &'static [&'static str],
}

/// A KAMS movement test definition with its expected measurement keys.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KamsTestDefinition {
    pub test_type: &'static str,
    pub name: &'static str,
    pub measurement_fields: &'static [&'static str],
}

pub const SPRINT_TESTS: &[TestDefinition] = &[
    TestDefinition {
        code: "SPR-01",
        name: "81 ft Sprint",
        category: "linear",
        unit: "seconds",
    },
    TestDefinition {
        code: "SPR-02",
        name: "5-yard Directional - Left",
        category: "directional",
        unit: "seconds",
    },
    TestDefinition {
        code: "SPR-03",
        name: "5-yard Directional - Center",
        category: "directional",
        unit: "seconds",
    },
    TestDefinition {
        code: "SPR-04",
        name: "5-yard Directional - Right",
        category: "directional",
        unit: "seconds",
    },
    TestDefinition {
        code: "SPR-05",
        name: "Curvilinear Sprint",
        category: "curvilinear",
        unit: "seconds",
    },
];

pub const TPI_POWER_TESTS: &[TestDefinition] = &[
    TestDefinition {
        code: "TPI-01",
        name: "Vertical Jump",
        category: "lower_body_power",
        unit: "inches",
    },
    TestDefinition {
        code: "TPI-02",
        name: "Broad Jump",
        category: "lower_body_power",
        unit: "inches",
    },
    TestDefinition {
        code: "TPI-03",
        name: "Seated Chest Pass",
        category: "upper_body_power",
        unit: "inches",
    },
    TestDefinition {
        code: "TPI-04",
        name: "Sit Up Throw",
        category: "core_power",
        unit: "inches",
    },
    TestDefinition {
        code: "TPI-05",
        name: "Baseline Shot Put",
        category: "rotational_power",
        unit: "inches",
    },
];

const PASS_NEUTRAL_FAIL: &[&str] = &["Pass", "Neutral", "Fail"];
const HIP_45_OPTIONS: &[&str] = &["> 45°", "= 45°", "< 45°"];
const DEEP_SQUAT_OPTIONS: &[&str] = &["Pass", "Improves with Holding", "Fail"];

pub const ONBASEU_TESTS: &[CategoricalTestDefinition] = &[
    CategoricalTestDefinition {
        code: "OBU-01",
        name: "Shoulder 46 Test",
        category: "upper_body",
        subcategory: "shoulder_mobility",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-02",
        name: "90/90 Test",
        category: "upper_body",
        subcategory: "shoulder_mobility",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-03",
        name: "Lat Test",
        category: "upper_body",
        subcategory: "shoulder_mobility",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-04",
        name: "Hitchhiker Test",
        category: "upper_body",
        subcategory: "upper_body_control",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-05",
        name: "Hip 45 Test",
        category: "lower_body",
        subcategory: "hip_mobility",
        is_bilateral: true,
        options: HIP_45_OPTIONS,
    },
    CategoricalTestDefinition {
        code: "OBU-06",
        name: "Pelvic Tilt Test",
        category: "lower_body",
        subcategory: "hip_mobility",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-07",
        name: "Pelvic Rotation Test",
        category: "lower_body",
        subcategory: "hip_mobility",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-08",
        name: "Deep Squat Test",
        category: "lower_body",
        subcategory: "lower_body_control",
        is_bilateral: false,
        options: DEEP_SQUAT_OPTIONS,
    },
    CategoricalTestDefinition {
        code: "OBU-09",
        name: "Hurdle Step Test",
        category: "lower_body",
        subcategory: "lower_body_control",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-10",
        name: "MSR",
        category: "lower_body",
        subcategory: "lower_body_control",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-11",
        name: "Toe Tap Test",
        category: "lower_body",
        subcategory: "foot_ankle",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-12",
        name: "Ankle Rocking Test",
        category: "lower_body",
        subcategory: "foot_ankle",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-13",
        name: "Push-Off Test",
        category: "core",
        subcategory: "power_stability",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-14",
        name: "Separation Test",
        category: "core",
        subcategory: "power_stability",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-15",
        name: "Holding Angle Test",
        category: "core",
        subcategory: "rotational_control",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "OBU-16",
        name: "Seated Trunk Rotation Test",
        category: "core",
        subcategory: "rotational_control",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
];

// The pitcher battery runs the same sixteen screens under its own codes so
// the two assessment histories stay separate.
pub const PITCHER_ONBASEU_TESTS: &[CategoricalTestDefinition] = &[
    CategoricalTestDefinition {
        code: "POBU-01",
        name: "Shoulder 46 Test",
        category: "upper_body",
        subcategory: "shoulder_mobility",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-02",
        name: "90/90 Test",
        category: "upper_body",
        subcategory: "shoulder_mobility",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-03",
        name: "Lat Test",
        category: "upper_body",
        subcategory: "shoulder_mobility",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-04",
        name: "Hitchhiker Test",
        category: "upper_body",
        subcategory: "upper_body_control",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-05",
        name: "Hip 45 Test",
        category: "lower_body",
        subcategory: "hip_mobility",
        is_bilateral: true,
        options: HIP_45_OPTIONS,
    },
    CategoricalTestDefinition {
        code: "POBU-06",
        name: "Pelvic Tilt Test",
        category: "lower_body",
        subcategory: "hip_mobility",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-07",
        name: "Pelvic Rotation Test",
        category: "lower_body",
        subcategory: "hip_mobility",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-08",
        name: "Deep Squat Test",
        category: "lower_body",
        subcategory: "lower_body_control",
        is_bilateral: false,
        options: DEEP_SQUAT_OPTIONS,
    },
    CategoricalTestDefinition {
        code: "POBU-09",
        name: "Hurdle Step Test",
        category: "lower_body",
        subcategory: "lower_body_control",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-10",
        name: "MSR",
        category: "lower_body",
        subcategory: "lower_body_control",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-11",
        name: "Toe Tap Test",
        category: "lower_body",
        subcategory: "foot_ankle",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-12",
        name: "Ankle Rocking Test",
        category: "lower_body",
        subcategory: "foot_ankle",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-13",
        name: "Push-Off Test",
        category: "core",
        subcategory: "power_stability",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-14",
        name: "Separation Test",
        category: "core",
        subcategory: "power_stability",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-15",
        name: "Holding Angle Test",
        category: "core",
        subcategory: "rotational_control",
        is_bilateral: false,
        options: PASS_NEUTRAL_FAIL,
    },
    CategoricalTestDefinition {
        code: "POBU-16",
        name: "Seated Trunk Rotation Test",
        category: "core",
        subcategory: "rotational_control",
        is_bilateral: true,
        options: PASS_NEUTRAL_FAIL,
    },
];

pub const KAMS_TESTS: &[KamsTestDefinition] = &[
    KamsTestDefinition {
        test_type: "rom",
        name: "Multi-Segmental ROM",
        measurement_fields: &[
            "hip_flexion_left",
            "hip_flexion_right",
            "hip_extension_left",
            "hip_extension_right",
            "hip_internal_rotation_left",
            "hip_internal_rotation_right",
            "hip_external_rotation_left",
            "hip_external_rotation_right",
            "ankle_dorsiflexion_left",
            "ankle_dorsiflexion_right",
            "shoulder_flexion_left",
            "shoulder_flexion_right",
            "shoulder_extension_left",
            "shoulder_extension_right",
            "thoracic_rotation_left",
            "thoracic_rotation_right",
        ],
    },
    KamsTestDefinition {
        test_type: "squat",
        name: "Overhead Squat",
        measurement_fields: &[
            "depth_score",
            "knee_tracking",
            "torso_angle",
            "arm_position",
            "heel_rise",
            "overall_quality",
        ],
    },
    KamsTestDefinition {
        test_type: "lunge",
        name: "Reverse Lunge",
        measurement_fields: &[
            "depth_left",
            "depth_right",
            "knee_tracking_left",
            "knee_tracking_right",
            "balance_left",
            "balance_right",
            "overall_quality_left",
            "overall_quality_right",
        ],
    },
    KamsTestDefinition {
        test_type: "balance",
        name: "Single Leg Balance",
        measurement_fields: &[
            "time_left",
            "time_right",
            "sway_left",
            "sway_right",
            "compensations_left",
            "compensations_right",
        ],
    },
    KamsTestDefinition {
        test_type: "jump",
        name: "Vertical Jump",
        measurement_fields: &[
            "height",
            "landing_quality",
            "knee_valgus",
            "asymmetry",
            "force_absorption",
        ],
    },
];

/// Look up a sprint test by code.
pub fn sprint_test(code: &str) -> Option<&'static TestDefinition> {
    SPRINT_TESTS.iter().find(|t| t.code == code)
}

/// Look up a TPI power test by code.
pub fn power_test(code: &str) -> Option<&'static TestDefinition> {
    TPI_POWER_TESTS.iter().find(|t| t.code == code)
}

/// Look up a categorical screen by battery and code.
pub fn categorical_test(
    assessment_type: AssessmentType,
    code: &str,
) -> Option<&'static CategoricalTestDefinition> {
    let table = match assessment_type {
        AssessmentType::OnBaseU => ONBASEU_TESTS,
        AssessmentType::PitcherOnBaseU => PITCHER_ONBASEU_TESTS,
        _ => return None,
    };
    table.iter().find(|t| t.code == code)
}

/// Look up a KAMS movement test by its type tag.
pub fn kams_test(test_type: &str) -> Option<&'static KamsTestDefinition> {
    KAMS_TESTS.iter().find(|t| t.test_type == test_type)
}

/// The sprint category for a catalog entry.
pub fn sprint_category(definition: &TestDefinition) -> SprintCategory {
    match definition.category {
        "linear" => SprintCategory::Linear,
        "curvilinear" => SprintCategory::Curvilinear,
        _ => SprintCategory::Directional,
    }
}
