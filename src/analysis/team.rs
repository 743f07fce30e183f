//! Team-level analysis built atop player analysis: roster averages,
//! per-date trends, and rankings.

use super::player::{
    calculate_trend, get_player_summary, trend_between, PlayerSummary, TrendSummary,
};
use super::{PlayerIdent, SessionData};
use crate::cli::types::{AssessmentType, PlayerId, TeamId};
use crate::scoring::session::calculate_session_scores;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Team metadata used to label analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamIdent {
    pub team_id: TeamId,
    pub team_name: String,
    pub organization: Option<String>,
}

/// Distribution of one assessment type's latest scores across a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAggregate {
    pub average: f64,
    pub player_count: usize,
    pub min: f64,
    pub max: f64,
}

/// Roster-wide overview of a team's latest assessment standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOverview {
    pub team_id: TeamId,
    pub team_name: String,
    pub organization: Option<String>,
    pub player_count: usize,
    pub pitchers: usize,
    pub position_players: usize,
    pub assessment_counts: BTreeMap<AssessmentType, usize>,
    pub team_averages: BTreeMap<AssessmentType, TypeAggregate>,
}

/// Per-type average/min/max/count across player summaries.
///
/// A player with no completed session of a type is excluded from that
/// type's statistics, not counted as zero; types nobody has are absent.
pub fn team_averages(summaries: &[PlayerSummary]) -> BTreeMap<AssessmentType, TypeAggregate> {
    let mut averages = BTreeMap::new();
    for assessment_type in AssessmentType::ALL {
        let scores: Vec<f64> = summaries
            .iter()
            .filter_map(|s| s.assessments.get(&assessment_type))
            .map(|snapshot| snapshot.overall_score)
            .collect();

        if scores.is_empty() {
            continue;
        }

        let sum: f64 = scores.iter().sum();
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        averages.insert(
            assessment_type,
            TypeAggregate {
                average: sum / scores.len() as f64,
                player_count: scores.len(),
                min,
                max,
            },
        );
    }
    averages
}

/// Assemble a team overview from active players' summaries and roster
/// composition counts supplied by the caller.
pub fn get_team_overview(
    team: &TeamIdent,
    summaries: &[PlayerSummary],
    pitchers: usize,
    position_players: usize,
    assessment_counts: BTreeMap<AssessmentType, usize>,
) -> TeamOverview {
    TeamOverview {
        team_id: team.team_id,
        team_name: team.team_name.clone(),
        organization: team.organization.clone(),
        player_count: summaries.len(),
        pitchers,
        position_players,
        assessment_counts,
        team_averages: team_averages(summaries),
    }
}

/// Average team score on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTrendPoint {
    pub date: NaiveDate,
    pub average_score: f64,
    pub assessment_count: usize,
}

/// Team score movement over time for one assessment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTrends {
    pub team_id: TeamId,
    pub team_name: String,
    pub assessment_type: AssessmentType,
    pub trend_data: Vec<TeamTrendPoint>,
    pub trend: TrendSummary,
}

/// Trend a team's completed sessions of one type: sessions are grouped by
/// calendar date, same-day scores are averaged across players, and the
/// dated averages are trended with the same +/-5 deadband as player
/// progress.
pub fn get_team_trends(
    team: &TeamIdent,
    assessment_type: AssessmentType,
    sessions: &[SessionData],
) -> TeamTrends {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for session in sessions {
        let scores = calculate_session_scores(&session.results);
        by_date.entry(session.date).or_default().push(scores.overall);
    }

    let trend_data: Vec<TeamTrendPoint> = by_date
        .into_iter()
        .map(|(date, scores)| TeamTrendPoint {
            date,
            average_score: scores.iter().sum::<f64>() / scores.len() as f64,
            assessment_count: scores.len(),
        })
        .collect();

    let trend = match trend_data.as_slice() {
        [] | [_] => calculate_trend(&[]),
        [first, .., last] => trend_between(first.average_score, last.average_score),
    };

    TeamTrends {
        team_id: team.team_id,
        team_name: team.team_name.clone(),
        assessment_type,
        trend_data,
        trend,
    }
}

/// One player's place in a team ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub rank: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub overall_score: f64,
    pub assessment_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRankings {
    pub team_id: TeamId,
    pub team_name: String,
    pub assessment_type: AssessmentType,
    pub rankings: Vec<PlayerRanking>,
    pub total_players: usize,
}

/// Rank a team's players by their latest completed session of one type.
///
/// Players with no session of the type are excluded entirely rather than
/// ranked last. Ties keep roster (input) order; ranks run 1..N.
pub fn get_player_rankings(
    team: &TeamIdent,
    assessment_type: AssessmentType,
    entries: &[(PlayerIdent, SessionData)],
) -> TeamRankings {
    let mut rankings: Vec<PlayerRanking> = entries
        .iter()
        .map(|(player, session)| {
            let scores = calculate_session_scores(&session.results);
            PlayerRanking {
                rank: 0,
                player_id: player.player_id,
                player_name: player.player_name.clone(),
                overall_score: scores.overall,
                assessment_date: session.date,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = i + 1;
    }

    TeamRankings {
        team_id: team.team_id,
        team_name: team.team_name.clone(),
        assessment_type,
        total_players: rankings.len(),
        rankings,
    }
}

/// Convenience: build each player's summary from their latest sessions.
pub fn summarize_roster(
    players: &[(PlayerIdent, Vec<SessionData>)],
) -> Vec<PlayerSummary> {
    players
        .iter()
        .map(|(player, latest_sessions)| get_player_summary(player, latest_sessions))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::SessionId;
    use crate::scoring::onbaseu::CategoricalResult;
    use crate::scoring::session::SessionResults;
    use crate::scoring::sprint::{SprintCategory, SprintResult};

    fn team() -> TeamIdent {
        TeamIdent {
            team_id: TeamId::new(1),
            team_name: "River Hawks".to_string(),
            organization: None,
        }
    }

    fn ident(id: i64, name: &str) -> PlayerIdent {
        PlayerIdent {
            player_id: PlayerId::new(id),
            player_name: name.to_string(),
            team_name: Some("River Hawks".to_string()),
        }
    }

    fn sprint_session(id: i64, player: i64, date: &str, time: f64) -> SessionData {
        SessionData {
            session_id: SessionId::new(id),
            player_id: PlayerId::new(player),
            date: date.parse().unwrap(),
            results: SessionResults::Sprint(vec![SprintResult::new(
                "SPR-01",
                "81 ft Sprint",
                SprintCategory::Linear,
                [Some(time), None, None],
            )]),
        }
    }

    fn onbaseu_session(id: i64, player: i64, date: &str, label: &str) -> SessionData {
        SessionData {
            session_id: SessionId::new(id),
            player_id: PlayerId::new(player),
            date: date.parse().unwrap(),
            results: SessionResults::OnBaseU(vec![CategoricalResult::new(
                "OBU-01", "Pelvic Tilt", "mobility", None, label,
            )]),
        }
    }

    #[test]
    fn test_team_averages_exclude_missing_players() {
        // Three players; only one has a sprint session
        let summaries = summarize_roster(&[
            (ident(1, "A"), vec![sprint_session(1, 1, "2025-05-01", 2.80)]),
            (ident(2, "B"), vec![onbaseu_session(2, 2, "2025-05-01", "Pass")]),
            (ident(3, "C"), vec![]),
        ]);
        let averages = team_averages(&summaries);

        let sprint = &averages[&AssessmentType::Sprint];
        assert_eq!(sprint.player_count, 1);
        assert_eq!(sprint.average, 100.0);
        assert_eq!(sprint.min, 100.0);
        assert_eq!(sprint.max, 100.0);

        assert!(averages.contains_key(&AssessmentType::OnBaseU));
        assert!(!averages.contains_key(&AssessmentType::Kams));
    }

    #[test]
    fn test_team_averages_min_max() {
        let summaries = summarize_roster(&[
            (ident(1, "A"), vec![onbaseu_session(1, 1, "2025-05-01", "Pass")]),
            (ident(2, "B"), vec![onbaseu_session(2, 2, "2025-05-01", "Fail")]),
        ]);
        let aggregate = &team_averages(&summaries)[&AssessmentType::OnBaseU];
        assert_eq!(aggregate.player_count, 2);
        assert_eq!(aggregate.max, 100.0);
        assert!((aggregate.min - 33.333_333).abs() < 0.001);
        assert!((aggregate.average - 66.666_666).abs() < 0.001);
    }

    #[test]
    fn test_team_trends_group_same_day() {
        let sessions = vec![
            // Two players on the same date average together
            sprint_session(1, 1, "2025-04-01", 3.20), // red, low
            sprint_session(2, 2, "2025-04-01", 2.80), // 100
            sprint_session(3, 1, "2025-06-01", 2.80),
            sprint_session(4, 2, "2025-06-01", 2.80),
        ];
        let trends = get_team_trends(&team(), AssessmentType::Sprint, &sessions);

        assert_eq!(trends.trend_data.len(), 2);
        assert_eq!(trends.trend_data[0].assessment_count, 2);
        assert!(trends.trend_data[0].average_score < 100.0);
        assert_eq!(trends.trend_data[1].average_score, 100.0);
        assert_eq!(
            trends.trend.direction,
            crate::analysis::player::TrendDirection::Improving
        );
    }

    #[test]
    fn test_team_trends_single_date_stable() {
        let sessions = vec![sprint_session(1, 1, "2025-04-01", 2.80)];
        let trends = get_team_trends(&team(), AssessmentType::Sprint, &sessions);
        assert_eq!(trends.trend_data.len(), 1);
        assert_eq!(trends.trend.change, 0.0);
    }

    #[test]
    fn test_rankings_exclude_sessionless_players() {
        let entries = vec![
            (ident(1, "Slow"), sprint_session(1, 1, "2025-05-01", 3.10)),
            (ident(2, "Fast"), sprint_session(2, 2, "2025-05-02", 2.75)),
        ];
        let rankings = get_player_rankings(&team(), AssessmentType::Sprint, &entries);

        assert_eq!(rankings.total_players, 2);
        assert_eq!(rankings.rankings[0].player_name, "Fast");
        assert_eq!(rankings.rankings[0].rank, 1);
        assert_eq!(rankings.rankings[1].rank, 2);
    }

    #[test]
    fn test_overview_assembly() {
        let summaries = summarize_roster(&[(
            ident(1, "A"),
            vec![onbaseu_session(1, 1, "2025-05-01", "Pass")],
        )]);
        let overview = get_team_overview(
            &team(),
            &summaries,
            1,
            0,
            BTreeMap::from([(AssessmentType::OnBaseU, 1)]),
        );
        assert_eq!(overview.player_count, 1);
        assert_eq!(overview.pitchers, 1);
        assert_eq!(overview.team_averages[&AssessmentType::OnBaseU].average, 100.0);
        assert_eq!(overview.assessment_counts[&AssessmentType::OnBaseU], 1);
    }
}
