//! Command implementations for the assessment CLI

pub mod common;
pub mod progress;
pub mod record;
pub mod roster;
pub mod team;
