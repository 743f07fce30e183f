//! Team analytics commands

use super::common::{player_ident, print_json, require_team, team_ident};
use crate::{
    analysis::{
        player::TrendDirection,
        team::{get_player_rankings, get_team_overview, get_team_trends, summarize_roster},
        PlayerIdent, SessionData,
    },
    cli::types::AssessmentType,
    storage::AssessmentDatabase,
    Result,
};
use chrono::NaiveDate;

/// Handle the team overview command
pub fn handle_team_overview(db: &AssessmentDatabase, name: &str, as_json: bool) -> Result<()> {
    let team = require_team(db, name)?;
    let roster = db.list_players(Some(team.team_id), true)?;

    let pitchers = roster.iter().filter(|(p, _)| p.is_pitcher).count();
    let position_players = roster.len() - pitchers;

    let mut players: Vec<(PlayerIdent, Vec<SessionData>)> = Vec::with_capacity(roster.len());
    for (player, team_name) in &roster {
        let latest = db.latest_sessions(player.player_id)?;
        players.push((player_ident(player, team_name.clone()), latest));
    }
    let summaries = summarize_roster(&players);
    let counts = db.assessment_counts(team.team_id)?;

    let overview = get_team_overview(
        &team_ident(&team),
        &summaries,
        pitchers,
        position_players,
        counts,
    );

    if as_json {
        return print_json(&overview);
    }

    println!("{}", overview.team_name);
    println!(
        "Roster: {} players ({} pitchers, {} position players)",
        overview.player_count, overview.pitchers, overview.position_players
    );
    if overview.team_averages.is_empty() {
        println!("No completed sessions");
        return Ok(());
    }
    for (assessment_type, aggregate) in &overview.team_averages {
        println!(
            "  {}: avg {:.1} over {} players (min {:.1}, max {:.1})",
            assessment_type,
            aggregate.average,
            aggregate.player_count,
            aggregate.min,
            aggregate.max
        );
    }
    Ok(())
}

/// Handle the team trends command
pub fn handle_team_trends(
    db: &AssessmentDatabase,
    name: &str,
    assessment_type: AssessmentType,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    as_json: bool,
) -> Result<()> {
    let team = require_team(db, name)?;
    let sessions = db.team_completed_sessions(team.team_id, assessment_type, start, end)?;
    let trends = get_team_trends(&team_ident(&team), assessment_type, &sessions);

    if as_json {
        return print_json(&trends);
    }

    println!("{} - {} trend", trends.team_name, trends.assessment_type);
    for point in &trends.trend_data {
        println!(
            "  {}: avg {:.1} ({} sessions)",
            point.date, point.average_score, point.assessment_count
        );
    }
    let direction = match trends.trend.direction {
        TrendDirection::Improving => "improving",
        TrendDirection::Declining => "declining",
        TrendDirection::Stable => "stable",
    };
    println!("Trend: {} ({:+.2})", direction, trends.trend.change);
    Ok(())
}

/// Handle the team rankings command
pub fn handle_team_rankings(
    db: &AssessmentDatabase,
    name: &str,
    assessment_type: AssessmentType,
    as_json: bool,
) -> Result<()> {
    let team = require_team(db, name)?;
    let roster = db.list_players(Some(team.team_id), true)?;

    // Roster order feeds the stable sort, so ties rank in roster order
    let mut entries: Vec<(PlayerIdent, SessionData)> = Vec::new();
    for (player, team_name) in &roster {
        if let Some(session) =
            db.latest_completed_session(player.player_id, assessment_type, None)?
        {
            entries.push((player_ident(player, team_name.clone()), session));
        }
    }

    let rankings = get_player_rankings(&team_ident(&team), assessment_type, &entries);

    if as_json {
        return print_json(&rankings);
    }

    println!(
        "{} - {} rankings ({} ranked)",
        rankings.team_name, rankings.assessment_type, rankings.total_players
    );
    for ranking in &rankings.rankings {
        println!(
            "  {}. {}: {:.1} on {}",
            ranking.rank, ranking.player_name, ranking.overall_score, ranking.assessment_date
        );
    }
    Ok(())
}
