//! CLI argument definitions and parsing.

pub mod types;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use types::{AssessmentType, Handedness, PlayerId, SessionId, Side};

#[derive(Debug, Parser)]
#[clap(name = "fieldhouse", about = "Athlete assessment scoring and analytics CLI")]
pub struct Fieldhouse {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage teams and view team analytics
    Team {
        #[clap(subcommand)]
        cmd: TeamCmd,
    },

    /// Manage players
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// List the fixed test catalogs for each assessment battery
    Tests {
        /// Limit to one battery, e.g. `onbaseu` or `sprint`.
        #[clap(long, short = 't')]
        assessment_type: Option<AssessmentType>,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Record assessment results into a session
    Record {
        #[clap(subcommand)]
        cmd: RecordCmd,
    },

    /// Mark a session complete and print its scores
    Complete {
        /// Session ID to close out.
        session_id: SessionId,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// A player's score timeline for one assessment type
    Progress {
        player_id: PlayerId,

        #[clap(long, short = 't')]
        assessment_type: AssessmentType,

        /// Earliest session date to include (YYYY-MM-DD).
        #[clap(long)]
        start: Option<NaiveDate>,

        /// Latest session date to include (YYYY-MM-DD).
        #[clap(long)]
        end: Option<NaiveDate>,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// A player's latest scores across every assessment type
    Summary {
        player_id: PlayerId,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Compare players head to head on one assessment type
    Compare {
        /// Player IDs to compare (at least two).
        #[clap(required = true, num_args = 2..)]
        player_ids: Vec<PlayerId>,

        #[clap(long, short = 't')]
        assessment_type: AssessmentType,

        /// Use each player's latest session at or before this date.
        #[clap(long)]
        as_of: Option<NaiveDate>,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TeamCmd {
    /// Create a team
    Add {
        name: String,

        #[clap(long, short)]
        organization: Option<String>,
    },

    /// List teams
    List {
        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Roster composition and per-type score averages
    Overview {
        name: String,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Team score movement over time for one assessment type
    Trends {
        name: String,

        #[clap(long, short = 't')]
        assessment_type: AssessmentType,

        /// Earliest session date to include (YYYY-MM-DD).
        #[clap(long)]
        start: Option<NaiveDate>,

        /// Latest session date to include (YYYY-MM-DD).
        #[clap(long)]
        end: Option<NaiveDate>,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Rank a team's players by latest score on one assessment type
    Rankings {
        name: String,

        #[clap(long, short = 't')]
        assessment_type: AssessmentType,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Add a player to the roster
    Add {
        name: String,

        /// Team to assign the player to, by name.
        #[clap(long)]
        team: Option<String>,

        /// Throwing handedness: `R` or `L`.
        #[clap(long, default_value = "R")]
        throws: Handedness,

        /// Mark the player as a pitcher.
        #[clap(long)]
        pitcher: bool,
    },

    /// List players
    List {
        /// Limit to one team, by name.
        #[clap(long)]
        team: Option<String>,

        /// Include inactive players.
        #[clap(long)]
        include_inactive: bool,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

/// Session coordinates shared by every record subcommand. The session is
/// found or created from (player, type, date).
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Player ID the results belong to.
    #[clap(long, short)]
    pub player_id: PlayerId,

    /// Assessment date (YYYY-MM-DD).
    #[clap(long, short)]
    pub date: NaiveDate,
}

#[derive(Debug, Subcommand)]
pub enum RecordCmd {
    /// Record a categorical screen result (OnBaseU batteries)
    Categorical {
        #[clap(flatten)]
        session: SessionArgs,

        /// `onbaseu` or `pitcher-onbaseu`.
        #[clap(long, short = 't', default_value = "onbaseu")]
        assessment_type: AssessmentType,

        /// Test code, e.g. `OBU-03`.
        #[clap(long)]
        code: String,

        /// Test name; defaults from the catalog for known codes.
        #[clap(long)]
        name: Option<String>,

        /// Category the test belongs to, e.g. `lower_body`; defaults from
        /// the catalog for known codes.
        #[clap(long)]
        category: Option<String>,

        /// Side the test was performed on, for lateralized screens.
        #[clap(long)]
        side: Option<Side>,

        /// Raw categorical outcome, e.g. `Pass`, `Neutral`, `Limited`.
        result: String,
    },

    /// Record sprint run times for one catalog test
    Sprint {
        #[clap(flatten)]
        session: SessionArgs,

        /// Catalog test code, e.g. `SPR-01`.
        #[clap(long)]
        code: String,

        /// Run times in seconds, up to three: `--runs 2.91,2.85`.
        /// Re-recording a test merges new runs into the open slots.
        #[clap(long, value_delimiter = ',', num_args = 1..=3)]
        runs: Vec<f64>,
    },

    /// Record a batch of TPI power results
    Power {
        #[clap(flatten)]
        session: SessionArgs,

        /// Result entries as `CODE=VALUE` or `CODE=VALUE@side`,
        /// repeatable: `-r TPI-01=28.5 -r TPI-05=42@left`.
        #[clap(long = "result", short = 'r', required = true)]
        results: Vec<String>,
    },

    /// Record one KAMS movement test from its measurements
    Kams {
        #[clap(flatten)]
        session: SessionArgs,

        /// Movement test: `rom`, `squat`, `lunge`, `balance`, or `jump`.
        #[clap(long, short = 't')]
        test_type: String,

        /// Measurements as `key=value`, repeatable:
        /// `-m left_knee_flexion=0.9 -m right_knee_flexion=0.85`.
        #[clap(long = "measure", short = 'm', required = true)]
        measures: Vec<String>,
    },
}
