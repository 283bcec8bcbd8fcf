//! # Ping Pong Tracker
//!
//! Records table-tennis results and derives leaderboards, head-to-head
//! records, streaks, monthly tables and notable matches.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (matches, roster, derived stats)
//! - **calculate**: Pure statistics engine over a snapshot of matches
//! - **storage**: The scores file (append and delete only)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
