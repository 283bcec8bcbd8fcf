use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{load_matches, ApiError};
use crate::calculate::{self, MonthlyLeaderboard, StatsReport};
use crate::models::{HeadToHead, PlayerSummary};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub players: Vec<PlayerSummary>,
    pub total_matches: u32,
}

pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let matches = load_matches(&state)?;
    Ok(Json(LeaderboardResponse {
        players: calculate::leaderboard(&matches, &state.roster),
        total_matches: matches.len() as u32,
    }))
}

// ── Head-to-head ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HeadToHeadRow {
    pub player: String,
    /// "W-L" per opponent column, "-" on the diagonal
    pub cells: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HeadToHeadResponse {
    pub players: Vec<String>,
    pub rows: Vec<HeadToHeadRow>,
    pub records: HeadToHead,
}

pub async fn head_to_head(
    State(state): State<AppState>,
) -> Result<Json<HeadToHeadResponse>, ApiError> {
    let matches = load_matches(&state)?;
    let h2h = calculate::head_to_head(&matches, &state.roster);

    let grid = h2h.grid(&state.roster);
    let players = grid.iter().map(|(p, _)| p.to_string()).collect();
    let rows = grid
        .into_iter()
        .map(|(player, cells)| HeadToHeadRow {
            player: player.to_string(),
            cells: cells
                .iter()
                .map(|c| c.map_or_else(|| "-".to_string(), |r| r.to_string()))
                .collect(),
        })
        .collect();

    Ok(Json(HeadToHeadResponse {
        players,
        rows,
        records: h2h,
    }))
}

// ── Monthly ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MonthlyResponse {
    pub months: Vec<MonthlyLeaderboard>,
}

pub async fn monthly(State(state): State<AppState>) -> Result<Json<MonthlyResponse>, ApiError> {
    let matches = load_matches(&state)?;
    Ok(Json(MonthlyResponse {
        months: calculate::monthly_leaderboards(&matches, &state.roster),
    }))
}

// ── Streaks ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StreakRow {
    pub player: String,
    pub longest_win_streak: u32,
}

#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    pub streaks: Vec<StreakRow>,
}

pub async fn streaks(State(state): State<AppState>) -> Result<Json<StreaksResponse>, ApiError> {
    let matches = load_matches(&state)?;
    let longest = calculate::longest_win_streaks(&matches, &state.roster);

    let mut streaks: Vec<StreakRow> = state
        .roster
        .extended_with(longest.keys().map(String::as_str))
        .into_iter()
        .map(|player| StreakRow {
            player: player.to_string(),
            longest_win_streak: longest.get(player).copied().unwrap_or(0),
        })
        .collect();
    streaks.sort_by(|a, b| b.longest_win_streak.cmp(&a.longest_win_streak));

    Ok(Json(StreaksResponse { streaks }))
}

pub async fn report(State(state): State<AppState>) -> Result<Json<StatsReport>, ApiError> {
    let matches = load_matches(&state)?;
    Ok(Json(StatsReport::build(&matches, &state.roster)))
}
