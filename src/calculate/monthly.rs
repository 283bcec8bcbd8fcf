//! Monthly win/loss tables.

use std::collections::BTreeMap;

use crate::models::{MatchRecord, Month, MonthlyTable, WinLoss};

/// One table per calendar month that has matches, oldest month first.
pub fn monthly_tables(matches: &[MatchRecord]) -> Vec<MonthlyTable> {
    let by_month = matches.iter().fold(
        BTreeMap::<Month, BTreeMap<String, WinLoss>>::new(),
        |mut months, m| {
            let outcome = m.outcome();
            let records = months.entry(Month::of(m.played_on)).or_default();
            records.entry(outcome.winner.to_string()).or_default().wins += 1;
            records.entry(outcome.loser.to_string()).or_default().losses += 1;
            months
        },
    );

    by_month
        .into_iter()
        .map(|(month, records)| MonthlyTable { month, records })
        .collect()
}
