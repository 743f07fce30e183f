//! Player progress, summary, and comparison commands

use super::common::{player_ident, print_json, require_player};
use crate::{
    analysis::{
        player::{compare_players, get_player_progress, get_player_summary, TrendDirection},
        SessionData,
    },
    cli::types::{AssessmentType, PlayerId},
    storage::AssessmentDatabase,
    Result,
};
use chrono::NaiveDate;

fn trend_word(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Improving => "improving",
        TrendDirection::Declining => "declining",
        TrendDirection::Stable => "stable",
    }
}

/// Handle the progress command
pub fn handle_progress(
    db: &AssessmentDatabase,
    player_id: PlayerId,
    assessment_type: AssessmentType,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    as_json: bool,
) -> Result<()> {
    let (player, _) = require_player(db, player_id)?;
    let sessions = db.completed_sessions(player_id, assessment_type, start, end)?;
    let progress = get_player_progress(player_id, assessment_type, &sessions);

    if as_json {
        return print_json(&progress);
    }

    println!(
        "{} - {} ({} completed sessions)",
        player.name, assessment_type, progress.total_assessments
    );
    for point in &progress.progress_data {
        println!(
            "  {}: {:.1} ({})",
            point.date, point.overall_score, point.scores.color
        );
    }
    println!(
        "Trend: {} ({:+.2})",
        trend_word(progress.trend.direction),
        progress.trend.change
    );
    Ok(())
}

/// Handle the summary command
pub fn handle_summary(db: &AssessmentDatabase, player_id: PlayerId, as_json: bool) -> Result<()> {
    let (player, team_name) = require_player(db, player_id)?;
    let latest = db.latest_sessions(player_id)?;
    let summary = get_player_summary(&player_ident(&player, team_name), &latest);

    if as_json {
        return print_json(&summary);
    }

    let team_label = summary.team_name.as_deref().unwrap_or("unassigned");
    println!("{} ({})", summary.player_name, team_label);
    if summary.assessments.is_empty() {
        println!("  No completed sessions");
        return Ok(());
    }
    for (assessment_type, snapshot) in &summary.assessments {
        println!(
            "  {}: {:.1} ({}) as of {}",
            assessment_type, snapshot.overall_score, snapshot.color, snapshot.latest_date
        );
    }
    Ok(())
}

/// Handle the compare command
pub fn handle_compare(
    db: &AssessmentDatabase,
    player_ids: &[PlayerId],
    assessment_type: AssessmentType,
    as_of: Option<NaiveDate>,
    as_json: bool,
) -> Result<()> {
    let mut entries: Vec<(crate::analysis::PlayerIdent, SessionData)> = Vec::new();
    for &player_id in player_ids {
        let (player, team_name) = require_player(db, player_id)?;
        if let Some(session) = db.latest_completed_session(player_id, assessment_type, as_of)? {
            entries.push((player_ident(&player, team_name), session));
        } else {
            println!(
                "Skipping {}: no completed {} session",
                player.name, assessment_type
            );
        }
    }

    let comparison = compare_players(assessment_type, &entries);

    if as_json {
        return print_json(&comparison);
    }

    println!("{} comparison:", comparison.assessment_type);
    for rank in &comparison.rankings {
        let entry = comparison
            .comparison_data
            .iter()
            .find(|e| e.player_id == rank.player_id);
        if let Some(entry) = entry {
            println!(
                "  {}. {}: {:.1} ({}) on {}",
                rank.rank, entry.player_name, entry.overall_score, entry.color, entry.assessment_date
            );
        }
    }
    Ok(())
}
