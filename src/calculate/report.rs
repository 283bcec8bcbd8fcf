//! Every derived table for one snapshot of the match log.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{HeadToHead, MatchRecord, Month, MonthlyRow, PlayerSummary, Roster};

use super::{
    head_to_head, leaderboard, longest_match, longest_win_streaks, monthly_tables,
    recent_matches,
};

/// How many matches the "recent" section shows.
pub const RECENT_LIMIT: usize = 5;

/// Monthly leaderboard ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyLeaderboard {
    pub month: Month,
    pub label: String,
    pub rows: Vec<MonthlyRow>,
}

/// Totals across the whole log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportTotals {
    pub matches: u32,
    pub players: u32,
    pub points: u64,
    pub overtime_matches: u32,
}

/// All statistics computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub computed_at: DateTime<Utc>,
    pub totals: ReportTotals,
    pub leaderboard: Vec<PlayerSummary>,
    pub head_to_head: HeadToHead,
    pub monthly: Vec<MonthlyLeaderboard>,
    pub streaks: BTreeMap<String, u32>,
    pub longest_match: Option<MatchRecord>,
    pub recent_matches: Vec<MatchRecord>,
}

/// Monthly tables with zero-filled, sorted rows, oldest month first.
pub fn monthly_leaderboards(matches: &[MatchRecord], roster: &Roster) -> Vec<MonthlyLeaderboard> {
    monthly_tables(matches)
        .into_iter()
        .map(|table| MonthlyLeaderboard {
            month: table.month,
            label: table.month.label(),
            rows: table.leaderboard(roster),
        })
        .collect()
}

impl StatsReport {
    pub fn build(matches: &[MatchRecord], roster: &Roster) -> Self {
        let leaderboard = leaderboard(matches, roster);

        let totals = ReportTotals {
            matches: matches.len() as u32,
            players: leaderboard.iter().filter(|s| s.games() > 0).count() as u32,
            points: matches.iter().map(MatchRecord::total_points).sum(),
            overtime_matches: matches.iter().filter(|m| m.is_overtime()).count() as u32,
        };

        Self {
            computed_at: Utc::now(),
            totals,
            leaderboard,
            head_to_head: head_to_head(matches, roster),
            monthly: monthly_leaderboards(matches, roster),
            streaks: longest_win_streaks(matches, roster),
            longest_match: longest_match(matches).cloned(),
            recent_matches: recent_matches(matches, RECENT_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
