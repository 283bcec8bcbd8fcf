//! Derived statistics models.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{MatchId, Roster};

/// Win/loss tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl WinLoss {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win percentage (0 to 100), 0 when no games were played.
    pub fn win_percentage(&self) -> f64 {
        win_percentage(self.wins, self.losses)
    }
}

impl fmt::Display for WinLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

/// Win percentage from wins/losses (0 to 100).
pub fn win_percentage(wins: u32, losses: u32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64 * 100.0
    }
}

/// A player's largest winning margin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiggestWin {
    pub margin: u32,
    pub opponent: String,
    pub match_id: MatchId,
}

/// Per-player statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// Player name
    pub player: String,

    pub wins: u32,

    pub losses: u32,

    /// Points scored across all matches
    pub points_for: u64,

    /// Points conceded across all matches
    pub points_against: u64,

    /// Wins in games that went past 11
    pub overtime_wins: u32,

    /// Losses in games that went past 11
    pub overtime_losses: u32,

    /// Win percentage (0 to 100)
    pub win_percentage: f64,

    /// Largest winning margin, first found on ties
    pub biggest_win: Option<BiggestWin>,
}

impl PlayerSummary {
    /// Create a PlayerSummary, deriving the win percentage.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        player: String,
        wins: u32,
        losses: u32,
        points_for: u64,
        points_against: u64,
        overtime_wins: u32,
        overtime_losses: u32,
        biggest_win: Option<BiggestWin>,
    ) -> Self {
        Self {
            player,
            wins,
            losses,
            points_for,
            points_against,
            overtime_wins,
            overtime_losses,
            win_percentage: win_percentage(wins, losses),
            biggest_win,
        }
    }

    /// All-zero row for a player without matches.
    pub fn empty(player: String) -> Self {
        Self::new(player, 0, 0, 0, 0, 0, 0, None)
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn point_difference(&self) -> i128 {
        i128::from(self.points_for) - i128::from(self.points_against)
    }

    pub fn record(&self) -> WinLoss {
        WinLoss {
            wins: self.wins,
            losses: self.losses,
        }
    }
}

/// Head-to-head records: `records[a][b]` is a's record against b.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub records: BTreeMap<String, BTreeMap<String, WinLoss>>,
}

impl HeadToHead {
    /// Record of `player` against `opponent`. `None` on the diagonal or for
    /// a pair that was never tracked.
    pub fn record(&self, player: &str, opponent: &str) -> Option<WinLoss> {
        if player == opponent {
            return None;
        }
        self.records
            .get(player)
            .and_then(|row| row.get(opponent))
            .copied()
    }

    pub fn wins(&self, player: &str, opponent: &str) -> u32 {
        self.record(player, opponent).map_or(0, |r| r.wins)
    }

    pub fn losses(&self, player: &str, opponent: &str) -> u32 {
        self.record(player, opponent).map_or(0, |r| r.losses)
    }

    /// Every tracked player, in name order.
    pub fn players(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (player, row) in &self.records {
            names.push(player);
            names.extend(row.keys().map(String::as_str));
        }
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Grid of cells in roster order (plus any extra tracked players).
    /// Diagonal cells are `None`.
    pub fn grid<'a>(&'a self, roster: &'a Roster) -> Vec<(&'a str, Vec<Option<WinLoss>>)> {
        let players = roster.extended_with(self.players());
        players
            .iter()
            .map(|&p| {
                let cells = players
                    .iter()
                    .map(|&o| {
                        if p == o {
                            None
                        } else {
                            Some(self.record(p, o).unwrap_or_default())
                        }
                    })
                    .collect();
                (p, cells)
            })
            .collect()
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Human label, e.g. "June 2025".
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(day) => day.format("%B %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One leaderboard row of a monthly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub player: String,
    pub wins: u32,
    pub losses: u32,
}

/// Wins and losses per player within one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTable {
    pub month: Month,
    pub records: BTreeMap<String, WinLoss>,
}

impl MonthlyTable {
    pub fn record(&self, player: &str) -> WinLoss {
        self.records.get(player).copied().unwrap_or_default()
    }

    /// Zero-filled rows for every roster player (plus anyone else who played
    /// that month), stable-sorted by wins descending.
    pub fn leaderboard(&self, roster: &Roster) -> Vec<MonthlyRow> {
        let mut rows: Vec<MonthlyRow> = roster
            .extended_with(self.records.keys().map(String::as_str))
            .into_iter()
            .map(|player| {
                let record = self.record(player);
                MonthlyRow {
                    player: player.to_string(),
                    wins: record.wins,
                    losses: record.losses,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.wins.cmp(&a.wins));
        rows
    }
}
