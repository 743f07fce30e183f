//! Team and player roster commands

use super::common::{print_json, require_team};
use crate::{
    cli::types::Handedness,
    storage::AssessmentDatabase,
    Result,
};

/// Handle the team add command
pub fn handle_team_add(
    db: &mut AssessmentDatabase,
    name: &str,
    organization: Option<&str>,
) -> Result<()> {
    let team = db.add_team(name, organization)?;
    println!("✓ Added team {} (ID {})", team.name, team.team_id);
    Ok(())
}

/// Handle the team list command
pub fn handle_team_list(db: &AssessmentDatabase, as_json: bool) -> Result<()> {
    let teams = db.list_teams()?;

    if as_json {
        return print_json(&teams);
    }

    if teams.is_empty() {
        println!("No teams on file");
        return Ok(());
    }
    for team in &teams {
        match &team.organization {
            Some(org) => println!("{}: {} ({})", team.team_id, team.name, org),
            None => println!("{}: {}", team.team_id, team.name),
        }
    }
    Ok(())
}

/// Handle the player add command
pub fn handle_player_add(
    db: &mut AssessmentDatabase,
    name: &str,
    team: Option<&str>,
    throws: Handedness,
    is_pitcher: bool,
) -> Result<()> {
    let team_id = match team {
        Some(team_name) => Some(require_team(db, team_name)?.team_id),
        None => None,
    };

    let player = db.add_player(name, team_id, throws, is_pitcher)?;
    let role = if player.is_pitcher {
        "pitcher"
    } else {
        "position player"
    };
    println!(
        "✓ Added {} {} (ID {}, throws {})",
        role, player.name, player.player_id, player.throws
    );
    Ok(())
}

/// Handle the player list command
pub fn handle_player_list(
    db: &AssessmentDatabase,
    team: Option<&str>,
    include_inactive: bool,
    as_json: bool,
) -> Result<()> {
    let team_id = match team {
        Some(team_name) => Some(require_team(db, team_name)?.team_id),
        None => None,
    };

    let players = db.list_players(team_id, !include_inactive)?;

    if as_json {
        let records: Vec<_> = players.iter().map(|(player, _)| player).collect();
        return print_json(&records);
    }

    if players.is_empty() {
        println!("No players on file");
        return Ok(());
    }
    for (player, team_name) in &players {
        let role = if player.is_pitcher { "P" } else { "POS" };
        let team_label = team_name.as_deref().unwrap_or("unassigned");
        let status = if player.active { "" } else { " [inactive]" };
        println!(
            "{}: {} ({}, throws {}, {}){}",
            player.player_id, player.name, role, player.throws, team_label, status
        );
    }
    Ok(())
}
