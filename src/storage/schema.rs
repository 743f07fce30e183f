//! Database schema and connection management

use crate::error::FieldhouseError;
use crate::DB_PATH_ENV_VAR;
use anyhow::Result;
use dirs::data_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for assessment data
pub struct AssessmentDatabase {
    pub(crate) conn: Connection,
}

impl AssessmentDatabase {
    /// Create a new database connection and ensure tables exist
    pub fn new() -> Result<Self> {
        let db_path = Self::database_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open(&db_path)
    }

    /// Open (or create) a database at an explicit path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create an in-memory database, mainly for tests
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the database file
    fn database_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DB_PATH_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        let data_dir = data_dir().ok_or_else(|| FieldhouseError::Storage {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(data_dir.join("fieldhouse").join("assessments.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                organization TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                team_id INTEGER,
                name TEXT NOT NULL,
                throws TEXT NOT NULL DEFAULT 'R',
                is_pitcher INTEGER NOT NULL DEFAULT 0,
                active INTEGER NOT NULL DEFAULT 1,
                FOREIGN KEY (team_id) REFERENCES teams(team_id)
            )",
            [],
        )?;

        // One session per player, assessment type, and date
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                session_id INTEGER PRIMARY KEY,
                player_id INTEGER NOT NULL,
                assessment_type TEXT NOT NULL,
                assessment_date TEXT NOT NULL,
                is_complete INTEGER NOT NULL DEFAULT 0,
                UNIQUE (player_id, assessment_type, assessment_date),
                FOREIGN KEY (player_id) REFERENCES players(player_id)
            )",
            [],
        )?;

        // One result per session, test code, and side. The empty string
        // stands in for "no side" so the uniqueness constraint holds
        // (SQLite treats NULLs as distinct).
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS results (
                result_id INTEGER PRIMARY KEY,
                session_id INTEGER NOT NULL,
                test_code TEXT NOT NULL,
                side TEXT NOT NULL DEFAULT '',
                payload TEXT NOT NULL,
                UNIQUE (session_id, test_code, side),
                FOREIGN KEY (session_id) REFERENCES sessions(session_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_sessions_player_type_date
             ON sessions(player_id, assessment_type, assessment_date)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_results_session
             ON results(session_id)",
            [],
        )?;

        Ok(())
    }
}
