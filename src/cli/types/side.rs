//! Laterality types: measurement side and throwing handedness.

use crate::error::FieldhouseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the body a lateralized test was performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = FieldhouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            _ => Err(FieldhouseError::InvalidSide {
                value: s.to_string(),
            }),
        }
    }
}

/// Throwing handedness, used to resolve a pitcher's throwing arm vs glove arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "L")]
    Left,
}

impl Handedness {
    /// The side of the throwing arm.
    pub fn throwing_arm(&self) -> Side {
        match self {
            Handedness::Right => Side::Right,
            Handedness::Left => Side::Left,
        }
    }

    /// The side of the glove arm.
    pub fn glove_arm(&self) -> Side {
        self.throwing_arm().opposite()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Right => "R",
            Handedness::Left => "L",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Handedness {
    type Err = FieldhouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "R" | "RIGHT" => Ok(Handedness::Right),
            "L" | "LEFT" => Ok(Handedness::Left),
            _ => Err(FieldhouseError::InvalidHandedness {
                value: s.to_string(),
            }),
        }
    }
}
