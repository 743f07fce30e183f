//! Data models for the storage layer

use crate::cli::types::{AssessmentType, Handedness, PlayerId, SessionId, Side, TeamId};
use crate::scoring::kams::KamsResult;
use crate::scoring::onbaseu::CategoricalResult;
use crate::scoring::power::PowerResult;
use crate::scoring::session::SessionResults;
use crate::scoring::sprint::SprintResult;
use anyhow::bail;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Team roster record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    pub organization: Option<String>,
}

/// Player roster record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub team_id: Option<TeamId>,
    pub name: String,
    pub throws: Handedness,
    pub is_pitcher: bool,
    pub active: bool,
}

/// Assessment session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRow {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub assessment_type: AssessmentType,
    pub assessment_date: NaiveDate,
    pub is_complete: bool,
}

/// A single scored result as persisted: one of the per-assessment result
/// shapes, already scored by the matching scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredResult {
    Categorical(CategoricalResult),
    Power(PowerResult),
    Sprint(SprintResult),
    Kams(KamsResult),
}

impl StoredResult {
    /// The test code used in the per-session uniqueness key. KAMS results
    /// are keyed by test type, which is unique within a KAMS session.
    pub fn test_code(&self) -> &str {
        match self {
            StoredResult::Categorical(r) => &r.test_code,
            StoredResult::Power(r) => &r.test_code,
            StoredResult::Sprint(r) => &r.test_code,
            StoredResult::Kams(r) => r.test_type.as_str(),
        }
    }

    /// The side component of the uniqueness key; empty for unsided results.
    pub fn side_key(&self) -> &str {
        let side = match self {
            StoredResult::Categorical(r) => r.side,
            StoredResult::Power(r) => r.side,
            StoredResult::Sprint(_) | StoredResult::Kams(_) => None,
        };
        side.map(|s| s.as_str()).unwrap_or("")
    }
}

/// Reassemble a session's typed result set from stored payloads.
///
/// Payload kinds that do not belong to the session's assessment type are a
/// storage-corruption error, not a scoring concern.
pub fn assemble_results(
    assessment_type: AssessmentType,
    stored: Vec<StoredResult>,
) -> anyhow::Result<SessionResults> {
    match assessment_type {
        AssessmentType::OnBaseU | AssessmentType::PitcherOnBaseU => {
            let mut results = Vec::with_capacity(stored.len());
            for item in stored {
                match item {
                    StoredResult::Categorical(r) => results.push(r),
                    other => bail!(
                        "unexpected {} payload in a {} session",
                        other.kind_name(),
                        assessment_type
                    ),
                }
            }
            Ok(if assessment_type == AssessmentType::OnBaseU {
                SessionResults::OnBaseU(results)
            } else {
                SessionResults::PitcherOnBaseU(results)
            })
        }
        AssessmentType::TpiPower => {
            let mut results = Vec::with_capacity(stored.len());
            for item in stored {
                match item {
                    StoredResult::Power(r) => results.push(r),
                    other => bail!(
                        "unexpected {} payload in a tpi_power session",
                        other.kind_name()
                    ),
                }
            }
            Ok(SessionResults::TpiPower(results))
        }
        AssessmentType::Sprint => {
            let mut results = Vec::with_capacity(stored.len());
            for item in stored {
                match item {
                    StoredResult::Sprint(r) => results.push(r),
                    other => {
                        bail!("unexpected {} payload in a sprint session", other.kind_name())
                    }
                }
            }
            Ok(SessionResults::Sprint(results))
        }
        AssessmentType::Kams => {
            let mut results = Vec::with_capacity(stored.len());
            for item in stored {
                match item {
                    StoredResult::Kams(r) => results.push(r),
                    other => bail!("unexpected {} payload in a kams session", other.kind_name()),
                }
            }
            Ok(SessionResults::Kams(results))
        }
    }
}

impl StoredResult {
    fn kind_name(&self) -> &'static str {
        match self {
            StoredResult::Categorical(_) => "categorical",
            StoredResult::Power(_) => "power",
            StoredResult::Sprint(_) => "sprint",
            StoredResult::Kams(_) => "kams",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::sprint::SprintCategory;

    #[test]
    fn test_side_key_for_sided_result() {
        let result = StoredResult::Categorical(CategoricalResult::new(
            "OBU-01",
            "Pelvic Tilt",
            "mobility",
            Some(Side::Left),
            "Pass",
        ));
        assert_eq!(result.test_code(), "OBU-01");
        assert_eq!(result.side_key(), "left");
    }

    #[test]
    fn test_assemble_rejects_mismatched_payload() {
        let stored = vec![StoredResult::Sprint(SprintResult::new(
            "SPR-01",
            "81 ft Sprint",
            SprintCategory::Linear,
            [Some(2.9), None, None],
        ))];
        assert!(assemble_results(AssessmentType::Kams, stored).is_err());
    }

    #[test]
    fn test_assemble_round_trip() {
        let stored = vec![StoredResult::Sprint(SprintResult::new(
            "SPR-01",
            "81 ft Sprint",
            SprintCategory::Linear,
            [Some(2.9), None, None],
        ))];
        let results = assemble_results(AssessmentType::Sprint, stored).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.assessment_type(), AssessmentType::Sprint);
    }
}
