//! Error types for the Fieldhouse assessment library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FieldhouseError>;

#[derive(Error, Debug)]
pub enum FieldhouseError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Invalid assessment type: {value}")]
    InvalidAssessmentType { value: String },

    #[error("Invalid side: {value}")]
    InvalidSide { value: String },

    #[error("Invalid handedness: {value}")]
    InvalidHandedness { value: String },

    #[error("Invalid KAMS test type: {value}")]
    InvalidTestType { value: String },

    #[error("Unknown test code: {code}")]
    UnknownTestCode { code: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: i64 },

    #[error("Team not found: {name}")]
    TeamNotFound { name: String },

    #[error("Session not found: {id}")]
    SessionNotFound { id: i64 },

    #[error("Result already exists for test {test_code} on this session and side")]
    DuplicateResult { test_code: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl From<anyhow::Error> for FieldhouseError {
    fn from(err: anyhow::Error) -> Self {
        FieldhouseError::Storage {
            message: err.to_string(),
        }
    }
}
