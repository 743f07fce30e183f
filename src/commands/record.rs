//! Result intake and session completion commands
//!
//! Results are scored at intake: each handler runs the matching scorer and
//! persists the already-scored payload. Completing a session prints its
//! aggregate scores plus the follow-on analyses (pitcher arm balance,
//! directional sprint balance) where they apply.

use super::common::{parse_measure, parse_power_entry, print_json, require_player};
use crate::{
    cli::types::{AssessmentType, PlayerId, SessionId, Side},
    error::FieldhouseError,
    scoring::{
        catalog::{self, KAMS_TESTS, ONBASEU_TESTS, PITCHER_ONBASEU_TESTS, SPRINT_TESTS, TPI_POWER_TESTS},
        kams::{KamsResult, KamsTestType},
        onbaseu::CategoricalResult,
        pitcher::analyze_throwing_arm_vs_glove_arm,
        power::{self, PowerResult},
        session::{calculate_session_scores, SessionResults},
        sprint::{self, SprintResult},
    },
    storage::{AssessmentDatabase, SessionRow, StoredResult},
    Result,
};
use chrono::NaiveDate;
use serde_json::{json, Map, Number, Value};

/// Handle the tests command: print the fixed test catalogs.
pub fn handle_tests(assessment_type: Option<AssessmentType>, as_json: bool) -> Result<()> {
    let batteries: Vec<AssessmentType> = match assessment_type {
        Some(battery) => vec![battery],
        None => AssessmentType::ALL.to_vec(),
    };

    if as_json {
        let listing: Vec<Value> = batteries
            .iter()
            .map(|battery| json!({ "assessment_type": battery, "tests": battery_tests(*battery) }))
            .collect();
        return print_json(&listing);
    }

    for battery in batteries {
        println!("{battery}:");
        print_battery(battery);
    }
    Ok(())
}

fn battery_tests(battery: AssessmentType) -> Value {
    match battery {
        AssessmentType::OnBaseU => json!(ONBASEU_TESTS),
        AssessmentType::PitcherOnBaseU => json!(PITCHER_ONBASEU_TESTS),
        AssessmentType::Sprint => json!(SPRINT_TESTS),
        AssessmentType::TpiPower => json!(TPI_POWER_TESTS),
        AssessmentType::Kams => json!(KAMS_TESTS),
    }
}

fn print_battery(battery: AssessmentType) {
    match battery {
        AssessmentType::OnBaseU | AssessmentType::PitcherOnBaseU => {
            let table = if battery == AssessmentType::OnBaseU {
                ONBASEU_TESTS
            } else {
                PITCHER_ONBASEU_TESTS
            };
            for test in table {
                println!(
                    "  {}: {} [{}/{}]{} options: {}",
                    test.code,
                    test.name,
                    test.category,
                    test.subcategory,
                    if test.is_bilateral { " (bilateral)" } else { "" },
                    test.options.join(" | ")
                );
            }
        }
        AssessmentType::Sprint | AssessmentType::TpiPower => {
            let table = if battery == AssessmentType::Sprint {
                SPRINT_TESTS
            } else {
                TPI_POWER_TESTS
            };
            for test in table {
                println!(
                    "  {}: {} [{}] ({})",
                    test.code, test.name, test.category, test.unit
                );
            }
        }
        AssessmentType::Kams => {
            for test in KAMS_TESTS {
                println!(
                    "  {}: {} ({})",
                    test.test_type,
                    test.name,
                    test.measurement_fields.join(", ")
                );
            }
        }
    }
}

fn open_session(
    db: &mut AssessmentDatabase,
    player_id: PlayerId,
    assessment_type: AssessmentType,
    date: NaiveDate,
) -> Result<SessionRow> {
    require_player(db, player_id)?;
    Ok(db.get_or_create_session(player_id, assessment_type, date)?)
}

fn reject_duplicate(
    db: &AssessmentDatabase,
    session_id: SessionId,
    test_code: &str,
    side_key: &str,
) -> Result<()> {
    if db.get_result(session_id, test_code, side_key)?.is_some() {
        return Err(FieldhouseError::DuplicateResult {
            test_code: test_code.to_string(),
        });
    }
    Ok(())
}

/// Handle recording a categorical screen result.
///
/// Catalog codes resolve their own name and category; explicit `--name` and
/// `--category` cover ad-hoc screens (and override the catalog when given).
#[allow(clippy::too_many_arguments)]
pub fn handle_record_categorical(
    db: &mut AssessmentDatabase,
    player_id: PlayerId,
    date: NaiveDate,
    assessment_type: AssessmentType,
    code: &str,
    name: Option<&str>,
    category: Option<&str>,
    side: Option<Side>,
    result: &str,
) -> Result<()> {
    if !matches!(
        assessment_type,
        AssessmentType::OnBaseU | AssessmentType::PitcherOnBaseU
    ) {
        return Err(FieldhouseError::InvalidAssessmentType {
            value: format!("{assessment_type} does not take categorical results"),
        });
    }

    let definition = catalog::categorical_test(assessment_type, code);
    let (name, category) = match (name, category) {
        (Some(name), Some(category)) => (name, category),
        (name, category) => {
            let definition = definition.ok_or_else(|| FieldhouseError::UnknownTestCode {
                code: code.to_string(),
            })?;
            (
                name.unwrap_or(definition.name),
                category.unwrap_or(definition.category),
            )
        }
    };

    let session = open_session(db, player_id, assessment_type, date)?;
    let scored = CategoricalResult::new(code, name, category, side, result);
    reject_duplicate(db, session.session_id, code, side.map(|s| s.as_str()).unwrap_or(""))?;

    db.insert_result(session.session_id, &StoredResult::Categorical(scored.clone()))?;
    println!(
        "✓ {}: {} -> score {} ({})",
        scored.test_name, scored.result, scored.score, scored.color
    );
    println!("Recorded into session {}", session.session_id);
    Ok(())
}

/// Handle recording sprint run times.
///
/// Re-recording a test merges the new runs into its open trial slots; a
/// test with all three runs on file must be corrected, not appended to.
pub fn handle_record_sprint(
    db: &mut AssessmentDatabase,
    player_id: PlayerId,
    date: NaiveDate,
    code: &str,
    runs: &[f64],
) -> Result<()> {
    let definition = catalog::sprint_test(code).ok_or_else(|| FieldhouseError::UnknownTestCode {
        code: code.to_string(),
    })?;

    let session = open_session(db, player_id, AssessmentType::Sprint, date)?;

    let scored = match db.get_result(session.session_id, code, "")? {
        None => {
            let mut trials = [None; 3];
            for (slot, run) in trials.iter_mut().zip(runs) {
                *slot = Some(*run);
            }
            let scored = SprintResult::new(
                code,
                definition.name,
                catalog::sprint_category(definition),
                trials,
            );
            db.insert_result(session.session_id, &StoredResult::Sprint(scored.clone()))?;
            scored
        }
        Some(StoredResult::Sprint(mut existing)) => {
            let mut trials = existing.runs;
            let mut pending = runs.iter();
            for slot in trials.iter_mut().filter(|slot| slot.is_none()) {
                match pending.next() {
                    Some(run) => *slot = Some(*run),
                    None => break,
                }
            }
            if pending.next().is_some() {
                return Err(FieldhouseError::DuplicateResult {
                    test_code: code.to_string(),
                });
            }
            existing.update_runs(trials);
            db.update_result(session.session_id, &StoredResult::Sprint(existing.clone()))?;
            existing
        }
        Some(_) => {
            return Err(FieldhouseError::Storage {
                message: format!("stored result for {code} is not a sprint payload"),
            })
        }
    };

    match (scored.best_time, scored.score_percentage, scored.color) {
        (Some(best), Some(pct), Some(color)) => println!(
            "✓ {}: best {:.2}s -> {:.1}% ({})",
            scored.test_name, best, pct, color
        ),
        _ => println!("✓ {}: runs recorded", scored.test_name),
    }
    println!("Recorded into session {}", session.session_id);
    Ok(())
}

/// Handle recording a batch of TPI power results.
///
/// Relative tests resolve the vertical jump from the batch first, then from
/// the session's stored TPI-01 result.
pub fn handle_record_power(
    db: &mut AssessmentDatabase,
    player_id: PlayerId,
    date: NaiveDate,
    raw_entries: &[String],
) -> Result<()> {
    let mut entries = Vec::with_capacity(raw_entries.len());
    for raw in raw_entries {
        let (code, value, side) = parse_power_entry(raw)?;
        let definition =
            catalog::power_test(&code).ok_or_else(|| FieldhouseError::UnknownTestCode {
                code: code.clone(),
            })?;
        entries.push((code, value, side, definition));
    }

    let session = open_session(db, player_id, AssessmentType::TpiPower, date)?;

    let batch: Vec<(String, f64)> = entries
        .iter()
        .map(|(code, value, _, _)| (code.clone(), *value))
        .collect();
    let vertical_jump = match power::batch_vertical_jump(&batch) {
        Some(value) => Some(value),
        None => db.session_vertical_jump(session.session_id)?,
    };

    for (code, value, side, definition) in entries {
        let side_key = side.map(|s| s.as_str()).unwrap_or("");
        reject_duplicate(db, session.session_id, &code, side_key)?;

        let scored = PowerResult::new(code, definition.name, value, side, vertical_jump);
        match (scored.score_percentage, scored.color) {
            (Some(pct), Some(color)) => {
                println!("✓ {}: {} -> {:.1}% ({})", scored.test_name, value, pct, color)
            }
            _ => println!(
                "✓ {}: {} recorded, unscored (no vertical jump on file)",
                scored.test_name, value
            ),
        }
        db.insert_result(session.session_id, &StoredResult::Power(scored))?;
    }

    println!("Recorded into session {}", session.session_id);
    Ok(())
}

/// Handle recording one KAMS movement test.
pub fn handle_record_kams(
    db: &mut AssessmentDatabase,
    player_id: PlayerId,
    date: NaiveDate,
    test_type: &str,
    measures: &[String],
) -> Result<()> {
    let test_type: KamsTestType = test_type.parse()?;

    let mut measurements = Map::new();
    for raw in measures {
        let (key, value) = parse_measure(raw)?;
        let number = Number::from_f64(value).ok_or_else(|| FieldhouseError::Storage {
            message: format!("measurement {key} is not a finite number"),
        })?;
        measurements.insert(key, Value::Number(number));
    }

    let session = open_session(db, player_id, AssessmentType::Kams, date)?;
    reject_duplicate(db, session.session_id, test_type.as_str(), "")?;

    let scored = KamsResult::new(test_type, measurements);
    match (scored.overall_score, scored.symmetry_score) {
        (Some(overall), Some(symmetry)) => println!(
            "✓ {}: overall {:.1}, symmetry {:.1}",
            scored.test_type, overall, symmetry
        ),
        (Some(overall), None) => println!("✓ {}: overall {:.1}", scored.test_type, overall),
        _ => println!("✓ {}: measurements recorded", scored.test_type),
    }
    db.insert_result(session.session_id, &StoredResult::Kams(scored))?;
    println!("Recorded into session {}", session.session_id);
    Ok(())
}

/// Handle the complete command: close a session and print its scores.
pub fn handle_complete(
    db: &mut AssessmentDatabase,
    session_id: SessionId,
    as_json: bool,
) -> Result<()> {
    let session = db
        .get_session(session_id)?
        .ok_or(FieldhouseError::SessionNotFound {
            id: session_id.as_i64(),
        })?;

    db.mark_session_complete(session_id)?;

    let results = db.session_results(session_id, session.assessment_type)?;
    let scores = calculate_session_scores(&results);

    // Follow-on analyses that only apply to particular assessment types
    let arm_balance = match &results {
        SessionResults::PitcherOnBaseU(categorical) => {
            let (player, _) = require_player(db, session.player_id)?;
            Some(analyze_throwing_arm_vs_glove_arm(categorical, player.throws))
        }
        _ => None,
    };
    let directional_balance = match &results {
        SessionResults::Sprint(sprints) => Some(sprint::analyze_directional_balance(sprints)),
        _ => None,
    };

    if as_json {
        return print_json(&json!({
            "session_id": session_id,
            "assessment_type": session.assessment_type,
            "assessment_date": session.assessment_date,
            "scores": scores,
            "arm_balance": arm_balance,
            "directional_balance": directional_balance,
        }));
    }

    println!(
        "✓ Session {} ({}, {}) complete",
        session_id, session.assessment_type, session.assessment_date
    );
    println!("Overall: {:.1} ({})", scores.overall, scores.color);
    for (category, score) in &scores.categories {
        match (score.score, score.color) {
            (Some(value), Some(color)) => println!("  {category}: {value:.1} ({color})"),
            _ => println!("  {category}: no results"),
        }
    }

    if let Some(balance) = arm_balance {
        if balance.imbalance_detected {
            println!(
                "Arm imbalance: throwing {:.1} vs glove {:.1} (diff {:.1})",
                balance.throwing_arm_score, balance.glove_arm_score, balance.difference
            );
        } else {
            println!(
                "Arms balanced: throwing {:.1} vs glove {:.1}",
                balance.throwing_arm_score, balance.glove_arm_score
            );
        }
    }

    if let Some(balance) = directional_balance {
        if let Some(direction) = balance.imbalance_direction {
            println!(
                "Directional imbalance: {} side slower by {:.2}s",
                direction,
                balance.time_difference.unwrap_or_default()
            );
        }
    }

    Ok(())
}
