//! Fieldhouse Assessment Library
//!
//! A Rust library for recording structured physical-assessment sessions and
//! deriving normalized scores, color grades, and longitudinal/team analytics
//! from raw measurements.
//!
//! ## Features
//!
//! - **Deterministic Scoring**: Five per-assessment scorers (OnBaseU,
//!   Pitcher OnBaseU, TPI Power, Sprint, KAMS) convert raw measurements into
//!   normalized percentages and color grades
//! - **Session Aggregation**: Per-session overall scores and category
//!   breakdowns
//! - **Player Analysis**: Progress tracking with trend detection and
//!   cross-assessment summaries
//! - **Team Analysis**: Team averages, per-date trends, and player rankings
//! - **Local Storage**: SQLite-backed roster, session, and result records
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldhouse::scoring::{sprint, Color};
//!
//! // Score an 81 ft sprint run at the optimal threshold
//! let (pct, color) = sprint::score_result("81 ft Sprint", 2.80).unwrap();
//! assert_eq!(pct, 100.0);
//! assert_eq!(color, Color::Green);
//! ```
//!
//! ## Environment Configuration
//!
//! Override the database location:
//! ```bash
//! export FIELDHOUSE_DB=/path/to/assessments.db
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod error;
pub mod scoring;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{AssessmentType, Handedness, PlayerId, SessionId, Side, TeamId};
pub use error::{FieldhouseError, Result};
pub use scoring::{Color, session::SessionScores};

pub const DB_PATH_ENV_VAR: &str = "FIELDHOUSE_DB";
