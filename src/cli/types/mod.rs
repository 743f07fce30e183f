//! Type-safe wrappers and enums for assessment data.

pub mod assessment;
pub mod ids;
pub mod side;

pub use assessment::AssessmentType;
pub use ids::{PlayerId, SessionId, TeamId};
pub use side::{Handedness, Side};
