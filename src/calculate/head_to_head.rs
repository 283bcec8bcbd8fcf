//! Head-to-head matrix.

use crate::models::{HeadToHead, MatchRecord, Roster};

use super::summary::table_order;

/// Build every player's record against every other player.
///
/// All ordered roster pairs are present (zeroed when they never met). The
/// diagonal is never stored.
pub fn head_to_head(matches: &[MatchRecord], roster: &Roster) -> HeadToHead {
    let mut h2h = HeadToHead::default();

    let players = table_order(matches, roster);
    for &player in &players {
        for &opponent in &players {
            if player != opponent {
                h2h.records
                    .entry(player.to_string())
                    .or_default()
                    .entry(opponent.to_string())
                    .or_default();
            }
        }
    }

    matches.iter().fold(h2h, |mut h2h, m| {
        let outcome = m.outcome();
        if outcome.winner == outcome.loser {
            return h2h;
        }
        h2h.records
            .entry(outcome.winner.to_string())
            .or_default()
            .entry(outcome.loser.to_string())
            .or_default()
            .wins += 1;
        h2h.records
            .entry(outcome.loser.to_string())
            .or_default()
            .entry(outcome.winner.to_string())
            .or_default()
            .losses += 1;
        h2h
    })
}
