//! Notable match queries: longest match, biggest wins, recent results.

use crate::models::{BiggestWin, MatchRecord};

use super::summary::keep_biggest;

/// The match with the most combined points. First one wins ties.
pub fn longest_match(matches: &[MatchRecord]) -> Option<&MatchRecord> {
    matches.iter().fold(None, |best: Option<&MatchRecord>, m| match best {
        Some(b) if b.total_points() >= m.total_points() => Some(b),
        _ => Some(m),
    })
}

/// The match `player` won by the largest margin. First one wins ties.
pub fn biggest_win_for(player: &str, matches: &[MatchRecord]) -> Option<BiggestWin> {
    matches
        .iter()
        .filter(|m| m.winner() == player)
        .fold(None, |best, m| {
            let outcome = m.outcome();
            keep_biggest(
                best,
                BiggestWin {
                    margin: outcome.margin(),
                    opponent: outcome.loser.to_string(),
                    match_id: m.id.clone(),
                },
            )
        })
}

/// All matches, newest first. Matches on the same day keep input order.
pub fn matches_by_date_desc(matches: &[MatchRecord]) -> Vec<&MatchRecord> {
    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by(|a, b| b.played_on.cmp(&a.played_on));
    ordered
}

/// The `limit` most recent matches.
pub fn recent_matches(matches: &[MatchRecord], limit: usize) -> Vec<&MatchRecord> {
    let mut ordered = matches_by_date_desc(matches);
    ordered.truncate(limit);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::fixtures::{day, game};
    use crate::calculate::summarize;
    use crate::models::Roster;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_longest_match() {
        let matches = vec![
            game("1", "A", "B", 11, 5, day(1)),
            game("2", "B", "A", 12, 10, day(2)),
            game("3", "A", "B", 11, 9, day(3)),
        ];
        let longest = longest_match(&matches).unwrap();
        assert_eq!(longest.id.as_str(), "2");
        assert_eq!(longest.total_points(), 22);
    }

    #[test]
    fn test_longest_match_first_on_tie() {
        let matches = vec![
            game("1", "A", "B", 11, 9, day(1)),
            game("2", "B", "A", 12, 8, day(2)),
        ];
        assert_eq!(longest_match(&matches).unwrap().id.as_str(), "1");
    }

    #[test]
    fn test_longest_match_scores_near_u32_max() {
        let matches = vec![
            game("1", "A", "B", 3_000_000_000, 2_999_999_998, day(1)),
            game("2", "B", "A", 11, 9, day(2)),
            game("3", "A", "B", 3_000_000_001, 2_999_999_999, day(3)),
        ];
        let longest = longest_match(&matches).unwrap();
        assert_eq!(longest.id.as_str(), "3");
        assert_eq!(longest.total_points(), 6_000_000_000);
    }

    #[test]
    fn test_notable_queries_idempotent() {
        let matches = vec![
            game("1", "A", "B", 11, 4, day(1)),
            game("2", "B", "A", 13, 11, day(2)),
            game("3", "A", "C", 11, 2, day(3)),
        ];
        assert_eq!(longest_match(&matches), longest_match(&matches));
        assert_eq!(
            biggest_win_for("A", &matches),
            biggest_win_for("A", &matches)
        );
        assert_eq!(biggest_win_for("A", &matches).unwrap().match_id.as_str(), "3");
    }

    #[test]
    fn test_longest_match_empty() {
        assert!(longest_match(&[]).is_none());
    }

    #[test]
    fn test_biggest_win_for() {
        let matches = vec![
            game("1", "A", "B", 11, 9, day(1)),
            game("2", "C", "A", 2, 11, day(2)),
            game("3", "A", "B", 11, 2, day(3)),
            game("4", "B", "A", 11, 0, day(4)),
        ];
        let biggest = biggest_win_for("A", &matches).unwrap();
        assert_eq!(biggest.margin, 9);
        assert_eq!(biggest.opponent, "C");
        assert_eq!(biggest.match_id.as_str(), "2");
    }

    #[test]
    fn test_biggest_win_for_no_wins() {
        let matches = vec![game("1", "A", "B", 11, 9, day(1))];
        assert!(biggest_win_for("B", &matches).is_none());
        assert!(biggest_win_for("Nobody", &matches).is_none());
    }

    #[test]
    fn test_biggest_win_matches_summary() {
        let matches = vec![
            game("1", "A", "B", 11, 4, day(1)),
            game("2", "B", "C", 11, 4, day(2)),
            game("3", "C", "A", 4, 11, day(3)),
            game("4", "A", "B", 15, 13, day(4)),
            game("5", "C", "B", 11, 1, day(5)),
        ];
        let roster = Roster::new(["A", "B", "C", "D"]);
        let summary = summarize(&matches, &roster);

        for player in roster.iter() {
            assert_eq!(
                biggest_win_for(player, &matches),
                summary[player].biggest_win,
                "mismatch for {player}"
            );
        }
    }

    #[test]
    fn test_recent_matches() {
        let matches = vec![
            game("1", "A", "B", 11, 5, day(3)),
            game("2", "A", "B", 11, 5, day(1)),
            game("3", "A", "B", 11, 5, day(5)),
            game("4", "A", "B", 11, 5, day(3)),
        ];
        let ids: Vec<&str> = recent_matches(&matches, 3)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "1", "4"]);

        assert_eq!(matches_by_date_desc(&matches).len(), 4);
        assert!(recent_matches(&[], 5).is_empty());
    }
}
