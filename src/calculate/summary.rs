//! Per-player summary statistics and the leaderboard.

use std::collections::BTreeMap;

use crate::models::{BiggestWin, MatchRecord, PlayerSummary, Roster};

#[derive(Debug, Default)]
struct Tally {
    wins: u32,
    losses: u32,
    points_for: u64,
    points_against: u64,
    overtime_wins: u32,
    overtime_losses: u32,
    biggest_win: Option<BiggestWin>,
}

/// Keep the larger of two winning margins. Ties keep the one already held.
pub(crate) fn keep_biggest(current: Option<BiggestWin>, candidate: BiggestWin) -> Option<BiggestWin> {
    match current {
        Some(held) if held.margin >= candidate.margin => Some(held),
        _ => Some(candidate),
    }
}

/// Summarize every player in a single pass over the matches.
///
/// All roster players are present, with zeroed rows when they have not
/// played. Players outside the roster that appear in matches are included
/// too.
pub fn summarize(matches: &[MatchRecord], roster: &Roster) -> BTreeMap<String, PlayerSummary> {
    let tallies = matches
        .iter()
        .fold(BTreeMap::<&str, Tally>::new(), |mut tallies, m| {
            let outcome = m.outcome();
            let overtime = m.is_overtime();

            let winner = tallies.entry(outcome.winner).or_default();
            winner.wins += 1;
            winner.points_for += u64::from(outcome.winner_score);
            winner.points_against += u64::from(outcome.loser_score);
            if overtime {
                winner.overtime_wins += 1;
            }
            winner.biggest_win = keep_biggest(
                winner.biggest_win.take(),
                BiggestWin {
                    margin: outcome.margin(),
                    opponent: outcome.loser.to_string(),
                    match_id: m.id.clone(),
                },
            );

            let loser = tallies.entry(outcome.loser).or_default();
            loser.losses += 1;
            loser.points_for += u64::from(outcome.loser_score);
            loser.points_against += u64::from(outcome.winner_score);
            if overtime {
                loser.overtime_losses += 1;
            }

            tallies
        });

    let mut summaries: BTreeMap<String, PlayerSummary> = roster
        .iter()
        .map(|p| (p.to_string(), PlayerSummary::empty(p.to_string())))
        .collect();

    for (player, t) in tallies {
        summaries.insert(
            player.to_string(),
            PlayerSummary::new(
                player.to_string(),
                t.wins,
                t.losses,
                t.points_for,
                t.points_against,
                t.overtime_wins,
                t.overtime_losses,
                t.biggest_win,
            ),
        );
    }

    summaries
}

/// Players in table order: roster first, then others by first appearance.
pub(crate) fn table_order<'a>(matches: &'a [MatchRecord], roster: &'a Roster) -> Vec<&'a str> {
    roster.extended_with(
        matches
            .iter()
            .flat_map(|m| [m.player_a.as_str(), m.player_b.as_str()]),
    )
}

/// Summaries sorted by wins, most first.
///
/// Only wins are compared; equal players keep roster order.
pub fn leaderboard(matches: &[MatchRecord], roster: &Roster) -> Vec<PlayerSummary> {
    let mut summaries = summarize(matches, roster);
    let mut rows: Vec<PlayerSummary> = table_order(matches, roster)
        .into_iter()
        .filter_map(|p| summaries.remove(p))
        .collect();
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
    rows
}
