pub mod matches;
pub mod stats;
