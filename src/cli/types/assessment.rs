//! Assessment battery types.

use crate::error::FieldhouseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five supported assessment batteries.
///
/// The string tags (`onbaseu`, `pitcher_onbaseu`, `tpi_power`, `sprint`,
/// `kams`) are stable wire/storage identifiers and must not change.
///
/// # Examples
///
/// ```rust
/// use fieldhouse::AssessmentType;
///
/// let sprint: AssessmentType = "sprint".parse().unwrap();
/// assert_eq!(sprint.to_string(), "sprint");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssessmentType {
    #[serde(rename = "onbaseu")]
    OnBaseU,
    #[serde(rename = "pitcher_onbaseu")]
    PitcherOnBaseU,
    #[serde(rename = "tpi_power")]
    TpiPower,
    #[serde(rename = "sprint")]
    Sprint,
    #[serde(rename = "kams")]
    Kams,
}

impl AssessmentType {
    /// All assessment types, in summary display order.
    pub const ALL: [AssessmentType; 5] = [
        AssessmentType::OnBaseU,
        AssessmentType::PitcherOnBaseU,
        AssessmentType::TpiPower,
        AssessmentType::Sprint,
        AssessmentType::Kams,
    ];

    /// The stable tag used in storage and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::OnBaseU => "onbaseu",
            AssessmentType::PitcherOnBaseU => "pitcher_onbaseu",
            AssessmentType::TpiPower => "tpi_power",
            AssessmentType::Sprint => "sprint",
            AssessmentType::Kams => "kams",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssessmentType {
    type Err = FieldhouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "onbaseu" => Ok(AssessmentType::OnBaseU),
            "pitcher_onbaseu" | "pitcher-onbaseu" => Ok(AssessmentType::PitcherOnBaseU),
            "tpi_power" | "tpi-power" | "tpi" => Ok(AssessmentType::TpiPower),
            "sprint" => Ok(AssessmentType::Sprint),
            "kams" => Ok(AssessmentType::Kams),
            _ => Err(FieldhouseError::InvalidAssessmentType {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_tag() {
        for ty in AssessmentType::ALL {
            assert_eq!(ty.as_str().parse::<AssessmentType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_accepts_cli_aliases() {
        assert_eq!(
            "tpi-power".parse::<AssessmentType>().unwrap(),
            AssessmentType::TpiPower
        );
        assert_eq!(
            "PITCHER_ONBASEU".parse::<AssessmentType>().unwrap(),
            AssessmentType::PitcherOnBaseU
        );
        assert!("yoga".parse::<AssessmentType>().is_err());
    }

    #[test]
    fn test_serializes_as_wire_tag() {
        let json = serde_json::to_string(&AssessmentType::TpiPower).unwrap();
        assert_eq!(json, "\"tpi_power\"");
    }
}
