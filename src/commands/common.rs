//! Common utilities and helper functions shared across commands.

use crate::{
    analysis::{PlayerIdent, TeamIdent},
    cli::types::{PlayerId, Side},
    error::FieldhouseError,
    storage::{AssessmentDatabase, Player, Team},
    Result,
};
use serde::Serialize;

/// Look up a team by name, failing loudly when it does not exist.
pub fn require_team(db: &AssessmentDatabase, name: &str) -> Result<Team> {
    db.team_by_name(name)?
        .ok_or_else(|| FieldhouseError::TeamNotFound {
            name: name.to_string(),
        })
}

/// Look up a player by ID, returning the roster record and team name.
pub fn require_player(
    db: &AssessmentDatabase,
    player_id: PlayerId,
) -> Result<(Player, Option<String>)> {
    db.get_player(player_id)?
        .ok_or(FieldhouseError::PlayerNotFound {
            id: player_id.as_i64(),
        })
}

pub fn team_ident(team: &Team) -> TeamIdent {
    TeamIdent {
        team_id: team.team_id,
        team_name: team.name.clone(),
        organization: team.organization.clone(),
    }
}

pub fn player_ident(player: &Player, team_name: Option<String>) -> PlayerIdent {
    PlayerIdent {
        player_id: player.player_id,
        player_name: player.name.clone(),
        team_name,
    }
}

/// Pretty-print any serializable analysis output.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a power batch entry of the form `CODE=VALUE` or `CODE=VALUE@side`.
pub fn parse_power_entry(entry: &str) -> Result<(String, f64, Option<Side>)> {
    let invalid = || FieldhouseError::Storage {
        message: format!("invalid result entry {entry:?}, expected CODE=VALUE[@side]"),
    };

    let (code, rest) = entry.split_once('=').ok_or_else(invalid)?;
    let (value_text, side) = match rest.split_once('@') {
        Some((value, side)) => (value, Some(side.parse::<Side>()?)),
        None => (rest, None),
    };
    let value: f64 = value_text.trim().parse().map_err(|_| invalid())?;

    Ok((code.trim().to_string(), value, side))
}

/// Parse a KAMS measurement of the form `key=value`.
pub fn parse_measure(entry: &str) -> Result<(String, f64)> {
    let invalid = || FieldhouseError::Storage {
        message: format!("invalid measurement {entry:?}, expected key=value"),
    };

    let (key, value_text) = entry.split_once('=').ok_or_else(invalid)?;
    let value: f64 = value_text.trim().parse().map_err(|_| invalid())?;
    Ok((key.trim().to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_power_entry_plain() {
        let (code, value, side) = parse_power_entry("TPI-01=28.5").unwrap();
        assert_eq!(code, "TPI-01");
        assert_eq!(value, 28.5);
        assert_eq!(side, None);
    }

    #[test]
    fn test_parse_power_entry_with_side() {
        let (code, value, side) = parse_power_entry("TPI-05=42@left").unwrap();
        assert_eq!(code, "TPI-05");
        assert_eq!(value, 42.0);
        assert_eq!(side, Some(Side::Left));
    }

    #[test]
    fn test_parse_power_entry_rejects_garbage() {
        assert!(parse_power_entry("TPI-01").is_err());
        assert!(parse_power_entry("TPI-01=fast").is_err());
        assert!(parse_power_entry("TPI-05=42@middle").is_err());
    }

    #[test]
    fn test_parse_measure() {
        let (key, value) = parse_measure("left_knee_flexion=0.9").unwrap();
        assert_eq!(key, "left_knee_flexion");
        assert_eq!(value, 0.9);
        assert!(parse_measure("knee_flexion").is_err());
    }
}
