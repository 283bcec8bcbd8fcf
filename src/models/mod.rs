//! Core data models for the match tracker.

mod ids;
mod match_record;
mod roster;
mod stats;

pub use ids::*;
pub use match_record::*;
pub use roster::*;
pub use stats::*;
