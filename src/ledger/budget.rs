//! Pure allowance calculations over a ledger snapshot.
//!
//! The monthly allowance is dynamic rather than a stored number: the annual
//! budget minus year-to-date net spend, spread evenly over the months left in
//! the year. Overspending in one month tightens the remaining months and
//! underspending loosens them. Nothing here mutates state or caches results;
//! edits to historical transactions retroactively change the year-to-date
//! figure on the next call.

use chrono::{Datelike, NaiveDate};

use crate::time::{months_remaining_in_year, year_of};

use super::{net_of, LedgerState};

/// Net spend across every bucket belonging to `today`'s calendar year,
/// including the live month.
pub fn year_to_date_net(state: &LedgerState, today: NaiveDate) -> f64 {
    let year = today.year();
    let past: f64 = state
        .history
        .iter()
        .filter(|(key, _)| year_of(key) == Some(year))
        .map(|(_, bucket)| net_of(&bucket.transactions))
        .sum();
    past + net_of(&state.transactions)
}

/// What is left of the annual budget after year-to-date activity.
pub fn remaining_annual(state: &LedgerState, today: NaiveDate) -> f64 {
    state.settings.annual_budget - year_to_date_net(state, today)
}

/// The allowance currently in effect: remaining annual budget divided by the
/// months left in the year. Returns 0 if no months remain, which cannot
/// happen for a valid date.
pub fn dynamic_monthly_goal(state: &LedgerState, today: NaiveDate) -> f64 {
    let months_left = months_remaining_in_year(today);
    if months_left <= 0 {
        return 0.0;
    }
    remaining_annual(state, today) / months_left as f64
}

/// Headline figure: allowance minus the live month's net spend. Goes negative
/// when the month is over budget.
pub fn monthly_remaining(state: &LedgerState, today: NaiveDate) -> f64 {
    dynamic_monthly_goal(state, today) - net_of(&state.transactions)
}

/// Progress toward the month's allowance as a percentage clamped to 0..=100.
pub fn progress_pct(state: &LedgerState, today: NaiveDate) -> f64 {
    let goal = dynamic_monthly_goal(state, today);
    if goal <= 0.0 {
        return 0.0;
    }
    (net_of(&state.transactions).max(0.0) / goal * 100.0).clamp(0.0, 100.0)
}
