//! Score validation for new matches.

use crate::models::{MatchError, NewMatch, Roster, STANDARD_TARGET};

/// Minimum winning margin.
pub const MIN_MARGIN: i64 = 2;

pub const INVALID_SCORE_REASON: &str =
    "no player reached the minimum score or the margin is below two";

pub const NEGATIVE_SCORE_REASON: &str = "scores must not be negative";

pub const SCORE_FORMAT_REASON: &str = "invalid score format, use e.g. 15-13 or 11-7";

/// Check a final score.
///
/// Someone must reach 11 and win by two. There is no upper bound, so
/// 15-13 or 21-19 are fine.
pub fn validate(score_a: i64, score_b: i64) -> Result<(), MatchError> {
    if score_a < 0 || score_b < 0 {
        return Err(MatchError::InvalidScore(NEGATIVE_SCORE_REASON.to_string()));
    }
    if score_a.max(score_b) < i64::from(STANDARD_TARGET) || (score_a - score_b).abs() < MIN_MARGIN
    {
        return Err(MatchError::InvalidScore(INVALID_SCORE_REASON.to_string()));
    }
    Ok(())
}

/// Parse a score typed as "A-B", e.g. "11-9".
pub fn parse_score(input: &str) -> Result<(i64, i64), MatchError> {
    let malformed = || MatchError::MalformedInput(SCORE_FORMAT_REASON.to_string());

    let (a, b) = input.trim().split_once('-').ok_or_else(malformed)?;
    let a = a.trim().parse::<i64>().map_err(|_| malformed())?;
    let b = b.trim().parse::<i64>().map_err(|_| malformed())?;
    Ok((a, b))
}

/// Full check of a submitted match: both players known and distinct, score
/// valid.
pub fn validate_new_match(new_match: &NewMatch, roster: &Roster) -> Result<(), MatchError> {
    for player in [&new_match.p1, &new_match.p2] {
        if !roster.contains(player) {
            return Err(MatchError::UnknownPlayer(player.clone()));
        }
    }
    if new_match.p1 == new_match.p2 {
        return Err(MatchError::SamePlayer(new_match.p1.clone()));
    }
    validate(new_match.score1, new_match.score2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_win_accepted() {
        assert!(validate(11, 9).is_ok());
        assert!(validate(3, 11).is_ok());
    }

    #[test]
    fn test_nobody_reached_eleven() {
        assert_eq!(
            validate(10, 8),
            Err(MatchError::InvalidScore(INVALID_SCORE_REASON.to_string()))
        );
    }

    #[test]
    fn test_margin_of_one_rejected() {
        let err = validate(11, 10).unwrap_err();
        assert_eq!(err.reason(), INVALID_SCORE_REASON);
    }

    #[test]
    fn test_overtime_accepted() {
        assert!(validate(15, 13).is_ok());
        assert!(validate(21, 19).is_ok());
        assert!(validate(13, 15).is_ok());
    }

    #[test]
    fn test_overtime_margin_of_one_rejected() {
        assert!(validate(14, 13).is_err());
    }

    #[test]
    fn test_negative_rejected() {
        let err = validate(11, -2).unwrap_err();
        assert!(matches!(err, MatchError::InvalidScore(_)));
        assert_eq!(err.reason(), NEGATIVE_SCORE_REASON);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("11-9").unwrap(), (11, 9));
        assert_eq!(parse_score(" 15 - 13 ").unwrap(), (15, 13));
    }

    #[test]
    fn test_parse_score_malformed() {
        for input in ["", "11", "11:9", "a-b", "11-", "11-9-7"] {
            assert!(
                matches!(parse_score(input), Err(MatchError::MalformedInput(_))),
                "{input:?} should be malformed"
            );
        }
    }

    fn new_match(p1: &str, p2: &str, s1: i64, s2: i64) -> NewMatch {
        NewMatch {
            p1: p1.to_string(),
            p2: p2.to_string(),
            score1: s1,
            score2: s2,
            date: None,
        }
    }

    #[test]
    fn test_validate_new_match() {
        let roster = Roster::default();
        assert!(validate_new_match(&new_match("Gregi", "Tomi", 11, 7), &roster).is_ok());
        assert_eq!(
            validate_new_match(&new_match("Gregi", "Zed", 11, 7), &roster),
            Err(MatchError::UnknownPlayer("Zed".to_string()))
        );
        assert_eq!(
            validate_new_match(&new_match("Tomi", "Tomi", 11, 7), &roster),
            Err(MatchError::SamePlayer("Tomi".to_string()))
        );
        assert!(matches!(
            validate_new_match(&new_match("Gregi", "Tomi", 11, 10), &roster),
            Err(MatchError::InvalidScore(_))
        ));
    }
}
