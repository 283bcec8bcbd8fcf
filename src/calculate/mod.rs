//! Statistics calculation engine.
//!
//! Pure functions over a snapshot of the match log:
//! - Score validation for new matches
//! - Per-player summaries and the leaderboard
//! - Head-to-head matrix
//! - Monthly win/loss tables
//! - Longest winning streaks
//! - Notable matches (longest match, biggest wins, recent results)
//!
//! Nothing here caches or mutates shared state; every call recomputes from
//! the slice it is given.

mod head_to_head;
mod monthly;
mod notable;
mod report;
mod streaks;
mod summary;
mod validate;

pub use head_to_head::head_to_head;
pub use monthly::monthly_tables;
pub use notable::{biggest_win_for, longest_match, matches_by_date_desc, recent_matches};
pub use report::{monthly_leaderboards, MonthlyLeaderboard, ReportTotals, StatsReport, RECENT_LIMIT};
pub use streaks::longest_win_streaks;
pub use summary::{leaderboard, summarize};
pub use validate::{
    parse_score, validate, validate_new_match, INVALID_SCORE_REASON, MIN_MARGIN,
    NEGATIVE_SCORE_REASON, SCORE_FORMAT_REASON,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::models::{MatchId, MatchRecord};

    /// A day in June 2025.
    pub fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    pub fn game(id: &str, a: &str, b: &str, score_a: u32, score_b: u32, on: NaiveDate) -> MatchRecord {
        MatchRecord::new(
            MatchId::from(id),
            a.to_string(),
            b.to_string(),
            score_a,
            score_b,
            on,
        )
    }
}
