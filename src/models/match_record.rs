//! Match record model: the result of one game between two players.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::MatchId;

/// Points needed to win a standard game. Anything above it is overtime.
pub const STANDARD_TARGET: u32 = 11;

/// Errors raised when a match is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Malformed match record: {0}")]
    MalformedInput(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Player cannot play against themselves: {0}")]
    SamePlayer(String),
}

impl MatchError {
    /// The bare rejection reason, without the category prefix.
    pub fn reason(&self) -> &str {
        match self {
            MatchError::InvalidScore(r)
            | MatchError::MalformedInput(r)
            | MatchError::UnknownPlayer(r)
            | MatchError::SamePlayer(r) => r,
        }
    }
}

/// A stored match result.
///
/// Serialized with the legacy field names (`p1`, `p2`, `score1`, `score2`,
/// `date`) so existing score files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchRecord")]
pub struct MatchRecord {
    pub id: MatchId,

    #[serde(rename = "p1")]
    pub player_a: String,

    #[serde(rename = "p2")]
    pub player_b: String,

    #[serde(rename = "score1")]
    pub score_a: u32,

    #[serde(rename = "score2")]
    pub score_b: u32,

    #[serde(rename = "date")]
    pub played_on: NaiveDate,
}

/// Winner and loser of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<'a> {
    pub winner: &'a str,
    pub loser: &'a str,
    pub winner_score: u32,
    pub loser_score: u32,
}

impl Outcome<'_> {
    pub fn margin(&self) -> u32 {
        self.winner_score.abs_diff(self.loser_score)
    }
}

impl MatchRecord {
    pub fn new(
        id: MatchId,
        player_a: String,
        player_b: String,
        score_a: u32,
        score_b: u32,
        played_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            player_a,
            player_b,
            score_a,
            score_b,
            played_on,
        }
    }

    /// Who won and who lost. Player B is credited when scores are level.
    pub fn outcome(&self) -> Outcome<'_> {
        if self.score_a > self.score_b {
            Outcome {
                winner: &self.player_a,
                loser: &self.player_b,
                winner_score: self.score_a,
                loser_score: self.score_b,
            }
        } else {
            Outcome {
                winner: &self.player_b,
                loser: &self.player_a,
                winner_score: self.score_b,
                loser_score: self.score_a,
            }
        }
    }

    pub fn winner(&self) -> &str {
        self.outcome().winner
    }

    pub fn margin(&self) -> u32 {
        self.score_a.abs_diff(self.score_b)
    }

    /// Combined points of both players.
    pub fn total_points(&self) -> u64 {
        u64::from(self.score_a) + u64::from(self.score_b)
    }

    /// Either player went past the standard target.
    pub fn is_overtime(&self) -> bool {
        self.score_a > STANDARD_TARGET || self.score_b > STANDARD_TARGET
    }

    pub fn involves(&self, player: &str) -> bool {
        self.player_a == player || self.player_b == player
    }
}

/// A match as found on disk: every field optional, scores untyped.
///
/// Converting into [`MatchRecord`] fails fast instead of coercing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMatchRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub p1: Option<String>,

    #[serde(default)]
    pub p2: Option<String>,

    #[serde(default)]
    pub score1: Option<Value>,

    #[serde(default)]
    pub score2: Option<Value>,

    #[serde(default)]
    pub date: Option<String>,
}

impl TryFrom<RawMatchRecord> for MatchRecord {
    type Error = MatchError;

    fn try_from(raw: RawMatchRecord) -> Result<Self, Self::Error> {
        let id = required(raw.id, "id")?;
        let player_a = required(raw.p1, "p1")?;
        let player_b = required(raw.p2, "p2")?;
        let score_a = score_field(raw.score1, "score1")?;
        let score_b = score_field(raw.score2, "score2")?;
        let date = required(raw.date, "date")?;
        let played_on = parse_match_date(&date)?;

        if player_a.trim().is_empty() || player_b.trim().is_empty() {
            return Err(MatchError::MalformedInput(
                "player name must not be empty".to_string(),
            ));
        }
        if player_a == player_b {
            return Err(MatchError::SamePlayer(player_a));
        }

        Ok(MatchRecord::new(
            MatchId::new(id),
            player_a,
            player_b,
            score_a,
            score_b,
            played_on,
        ))
    }
}

impl From<&MatchRecord> for RawMatchRecord {
    fn from(m: &MatchRecord) -> Self {
        Self {
            id: Some(m.id.as_str().to_string()),
            p1: Some(m.player_a.clone()),
            p2: Some(m.player_b.clone()),
            score1: Some(Value::from(m.score_a)),
            score2: Some(Value::from(m.score_b)),
            date: Some(m.played_on.format("%Y-%m-%d").to_string()),
        }
    }
}

impl RawMatchRecord {
    /// Content fingerprint used to derive ids for legacy records.
    pub fn fingerprint(&self) -> Vec<String> {
        let text = |v: &Option<Value>| v.as_ref().map(Value::to_string).unwrap_or_default();
        vec![
            self.p1.clone().unwrap_or_default(),
            self.p2.clone().unwrap_or_default(),
            text(&self.score1),
            text(&self.score2),
            self.date.clone().unwrap_or_default(),
        ]
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, MatchError> {
    value.ok_or_else(|| MatchError::MalformedInput(format!("missing field `{}`", field)))
}

fn score_field(value: Option<Value>, field: &str) -> Result<u32, MatchError> {
    let value = required(value, field)?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            MatchError::MalformedInput(format!(
                "`{}` must be a non-negative integer, got {}",
                field, value
            ))
        })
}

/// Parse a stored match date, keeping only the calendar day.
///
/// Accepts plain dates, `date time` and `dateTtime` strings with optional
/// fractional seconds, and RFC 3339 timestamps.
pub fn parse_match_date(s: &str) -> Result<NaiveDate, MatchError> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(MatchError::MalformedInput(format!(
        "unrecognised date `{}`",
        s
    )))
}

/// A match as submitted for recording, before an id and date are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub p1: String,
    pub p2: String,
    pub score1: i64,
    pub score2: i64,

    /// Defaults to the day the match is recorded.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
