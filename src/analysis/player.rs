//! Player-level analysis: progress over time, cross-assessment summaries,
//! and head-to-head comparison.

use super::{PlayerIdent, SessionData};
use crate::cli::types::{AssessmentType, PlayerId};
use crate::scoring::session::{calculate_session_scores, SessionScores};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Score change within this many points of zero counts as stable.
const TREND_DEADBAND: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// First-to-last score movement over a queried range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    pub change: f64,
    pub first_score: f64,
    pub last_score: f64,
}

impl TrendSummary {
    fn flat(score: f64) -> Self {
        Self {
            direction: TrendDirection::Stable,
            change: 0.0,
            first_score: score,
            last_score: score,
        }
    }
}

/// One session's contribution to a progress timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub session_id: crate::cli::types::SessionId,
    pub scores: SessionScores,
    pub overall_score: f64,
}

/// A player's progress on one assessment type over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub player_id: PlayerId,
    pub assessment_type: AssessmentType,
    pub progress_data: Vec<ProgressPoint>,
    pub trend: TrendSummary,
    pub total_assessments: usize,
}

/// Trend between two scores: change beyond the +/-5 deadband is improving or
/// declining, anything within it is stable. The change is rounded to two
/// decimals.
pub fn trend_between(first_score: f64, last_score: f64) -> TrendSummary {
    let change = ((last_score - first_score) * 100.0).round() / 100.0;
    let direction = if change > TREND_DEADBAND {
        TrendDirection::Improving
    } else if change < -TREND_DEADBAND {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };
    TrendSummary {
        direction,
        change,
        first_score,
        last_score,
    }
}

/// Trend across an ordered progress timeline. Fewer than two points is
/// stable with zero change.
pub fn calculate_trend(progress_data: &[ProgressPoint]) -> TrendSummary {
    match progress_data {
        [] => TrendSummary::flat(0.0),
        [only] => TrendSummary::flat(only.overall_score),
        [first, .., last] => trend_between(first.overall_score, last.overall_score),
    }
}

/// Build a player's progress timeline from their completed sessions of one
/// assessment type.
///
/// Sessions are ordered by date (re-sorted here, so callers need not
/// pre-sort) and each is re-scored through the session aggregator.
pub fn get_player_progress(
    player_id: PlayerId,
    assessment_type: AssessmentType,
    sessions: &[SessionData],
) -> PlayerProgress {
    let mut ordered: Vec<&SessionData> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.date);

    let progress_data: Vec<ProgressPoint> = ordered
        .iter()
        .map(|session| {
            let scores = calculate_session_scores(&session.results);
            ProgressPoint {
                date: session.date,
                session_id: session.session_id,
                overall_score: scores.overall,
                scores,
            }
        })
        .collect();

    let trend = calculate_trend(&progress_data);

    PlayerProgress {
        player_id,
        assessment_type,
        total_assessments: progress_data.len(),
        progress_data,
        trend,
    }
}

/// The latest completed session of one assessment type, scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub latest_date: NaiveDate,
    pub overall_score: f64,
    pub color: crate::scoring::Color,
    pub category_scores: BTreeMap<String, crate::scoring::CategoryScore>,
}

/// A player's latest standing on every assessment type they have completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: Option<String>,
    pub assessments: BTreeMap<AssessmentType, AssessmentSnapshot>,
}

/// Summarize a player from their most recent completed session per type.
///
/// Types with no completed session are omitted, not zeroed.
pub fn get_player_summary(player: &PlayerIdent, latest_sessions: &[SessionData]) -> PlayerSummary {
    let mut assessments = BTreeMap::new();
    for session in latest_sessions {
        let scores = calculate_session_scores(&session.results);
        assessments.insert(
            session.results.assessment_type(),
            AssessmentSnapshot {
                latest_date: session.date,
                overall_score: scores.overall,
                color: scores.color,
                category_scores: scores.categories,
            },
        );
    }

    PlayerSummary {
        player_id: player.player_id,
        player_name: player.player_name.clone(),
        team_name: player.team_name.clone(),
        assessments,
    }
}

/// One player's entry in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: Option<String>,
    pub assessment_date: NaiveDate,
    pub overall_score: f64,
    pub color: crate::scoring::Color,
    pub category_scores: BTreeMap<String, crate::scoring::CategoryScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub player_id: PlayerId,
    pub rank: usize,
}

/// Head-to-head comparison of players on one assessment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerComparison {
    pub assessment_type: AssessmentType,
    pub comparison_data: Vec<ComparisonEntry>,
    pub rankings: Vec<RankEntry>,
}

/// Compare players using each one's latest completed session at or before
/// the caller's cutoff (session selection is the caller's job; players with
/// no qualifying session are simply absent from `entries`).
///
/// Ranking is by overall score descending; ties keep the caller's input
/// order (the sort is stable).
pub fn compare_players(
    assessment_type: AssessmentType,
    entries: &[(PlayerIdent, SessionData)],
) -> PlayerComparison {
    let comparison_data: Vec<ComparisonEntry> = entries
        .iter()
        .map(|(player, session)| {
            let scores = calculate_session_scores(&session.results);
            ComparisonEntry {
                player_id: player.player_id,
                player_name: player.player_name.clone(),
                team_name: player.team_name.clone(),
                assessment_date: session.date,
                overall_score: scores.overall,
                color: scores.color,
                category_scores: scores.categories,
            }
        })
        .collect();

    let mut ranked: Vec<&ComparisonEntry> = comparison_data.iter().collect();
    ranked.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let rankings = ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| RankEntry {
            player_id: entry.player_id,
            rank: i + 1,
        })
        .collect();

    PlayerComparison {
        assessment_type,
        comparison_data,
        rankings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::SessionId;
    use crate::scoring::onbaseu::CategoricalResult;
    use crate::scoring::session::SessionResults;

    fn categorical_session(
        id: i64,
        player: i64,
        date: &str,
        labels: &[&str],
    ) -> SessionData {
        let results = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                CategoricalResult::new(format!("OBU-{:02}", i + 1), "Test", "mobility", None, *label)
            })
            .collect();
        SessionData {
            session_id: SessionId::new(id),
            player_id: PlayerId::new(player),
            date: date.parse().unwrap(),
            results: SessionResults::OnBaseU(results),
        }
    }

    fn ident(id: i64, name: &str) -> PlayerIdent {
        PlayerIdent {
            player_id: PlayerId::new(id),
            player_name: name.to_string(),
            team_name: None,
        }
    }

    #[test]
    fn test_trend_deadband() {
        assert_eq!(trend_between(50.0, 55.0).direction, TrendDirection::Stable);
        assert_eq!(trend_between(50.0, 45.0).direction, TrendDirection::Stable);
        assert_eq!(
            trend_between(50.0, 55.1).direction,
            TrendDirection::Improving
        );
        assert_eq!(
            trend_between(50.0, 44.9).direction,
            TrendDirection::Declining
        );
    }

    #[test]
    fn test_trend_change_rounded() {
        let trend = trend_between(33.333_333, 66.666_666);
        assert_eq!(trend.change, 33.33);
    }

    #[test]
    fn test_progress_orders_by_date_and_trends() {
        // Supplied out of order; Fail-heavy first session, Pass-heavy last
        let sessions = vec![
            categorical_session(2, 1, "2025-06-01", &["Pass", "Pass", "Pass"]),
            categorical_session(1, 1, "2025-01-15", &["Fail", "Fail", "Fail"]),
        ];
        let progress = get_player_progress(PlayerId::new(1), AssessmentType::OnBaseU, &sessions);

        assert_eq!(progress.total_assessments, 2);
        assert_eq!(progress.progress_data[0].session_id, SessionId::new(1));
        assert!((progress.progress_data[0].overall_score - 33.333_333).abs() < 0.001);
        assert_eq!(progress.progress_data[1].overall_score, 100.0);
        assert_eq!(progress.trend.direction, TrendDirection::Improving);
        assert_eq!(progress.trend.change, 66.67);
    }

    #[test]
    fn test_single_session_trend_stable_zero() {
        let sessions = vec![categorical_session(1, 1, "2025-01-15", &["Pass"])];
        let progress = get_player_progress(PlayerId::new(1), AssessmentType::OnBaseU, &sessions);
        assert_eq!(progress.trend.direction, TrendDirection::Stable);
        assert_eq!(progress.trend.change, 0.0);
        assert_eq!(progress.trend.first_score, 100.0);
    }

    #[test]
    fn test_empty_progress() {
        let progress = get_player_progress(PlayerId::new(1), AssessmentType::Sprint, &[]);
        assert_eq!(progress.total_assessments, 0);
        assert_eq!(progress.trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_summary_omits_missing_types() {
        let latest = vec![categorical_session(1, 1, "2025-03-01", &["Pass", "Neutral"])];
        let summary = get_player_summary(&ident(1, "Ana Reyes"), &latest);
        assert_eq!(summary.assessments.len(), 1);
        assert!(summary.assessments.contains_key(&AssessmentType::OnBaseU));
        assert!(!summary.assessments.contains_key(&AssessmentType::Sprint));
        let snapshot = &summary.assessments[&AssessmentType::OnBaseU];
        assert!((snapshot.overall_score - 83.333_333).abs() < 0.001);
    }

    #[test]
    fn test_compare_ranks_descending() {
        let entries = vec![
            (
                ident(1, "Low"),
                categorical_session(1, 1, "2025-03-01", &["Fail"]),
            ),
            (
                ident(2, "High"),
                categorical_session(2, 2, "2025-03-01", &["Pass"]),
            ),
        ];
        let comparison = compare_players(AssessmentType::OnBaseU, &entries);
        assert_eq!(comparison.rankings[0].player_id, PlayerId::new(2));
        assert_eq!(comparison.rankings[0].rank, 1);
        assert_eq!(comparison.rankings[1].player_id, PlayerId::new(1));
        assert_eq!(comparison.rankings[1].rank, 2);
    }

    #[test]
    fn test_compare_ties_keep_input_order() {
        let entries = vec![
            (
                ident(7, "First In"),
                categorical_session(1, 7, "2025-03-01", &["Pass"]),
            ),
            (
                ident(3, "Second In"),
                categorical_session(2, 3, "2025-03-01", &["Pass"]),
            ),
        ];
        let comparison = compare_players(AssessmentType::OnBaseU, &entries);
        assert_eq!(comparison.rankings[0].player_id, PlayerId::new(7));
        assert_eq!(comparison.rankings[1].player_id, PlayerId::new(3));
    }
}
