//! Longest winning streaks.

use std::collections::BTreeMap;

use crate::models::{MatchRecord, Roster};

use super::summary::table_order;

/// Longest run of consecutive wins per player, over matches in date order.
///
/// A streak is broken by every match the player does not win, including
/// matches played by others. Equal dates keep their input order.
pub fn longest_win_streaks(matches: &[MatchRecord], roster: &Roster) -> BTreeMap<String, u32> {
    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by_key(|m| m.played_on);

    let players = table_order(matches, roster);
    let mut current: BTreeMap<&str, u32> = players.iter().map(|&p| (p, 0)).collect();
    let mut longest: BTreeMap<&str, u32> = current.clone();

    for m in ordered {
        let winner = m.winner();
        for (&player, streak) in current.iter_mut() {
            if player == winner {
                *streak += 1;
                let best = longest.entry(player).or_default();
                *best = (*best).max(*streak);
            } else {
                *streak = 0;
            }
        }
    }

    longest
        .into_iter()
        .map(|(p, n)| (p.to_string(), n))
        .collect()
}
