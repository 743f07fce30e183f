//! Storage layer for rosters, sessions, and scored results
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures and stored-result payloads
//! - `schema`: Database connection and schema management
//! - `queries`: CRUD operations and analysis-feed queries
//!
//! Scoring happens before rows land here: results are inserted already
//! scored and come back out unchanged for the analysis layer.

pub mod models;
pub mod queries;
pub mod schema;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::AssessmentDatabase;
