//! Longitudinal and cross-player analysis
//!
//! Pure functions over session data supplied by the caller:
//! - `player`: progress over time, cross-assessment summaries, comparisons
//! - `team`: roster-wide averages, per-date trends, rankings
//!
//! Nothing here touches storage; the storage layer (or any other
//! collaborator) fetches completed sessions and hands them in.

pub mod player;
pub mod team;

pub use team::TeamIdent;

use crate::cli::types::{PlayerId, SessionId};
use crate::scoring::session::SessionResults;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One completed session's data, as supplied by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub date: NaiveDate,
    pub results: SessionResults,
}

/// Player identity metadata used to label analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerIdent {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: Option<String>,
}
