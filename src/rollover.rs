//! Month-boundary rollover: archives the finished month with the allowance
//! that was in effect, opens the month containing "today", and prunes
//! history outside the retention window.

use chrono::{Datelike, NaiveDate};

use crate::currency::round_currency;
use crate::ledger::budget::dynamic_monthly_goal;
use crate::ledger::{LedgerState, MonthBucket};
use crate::time::{first_day_of, month_key, year_of};

/// Outcome of an archiving rollover, suitable for a user-visible notice.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloverReport {
    pub closed_month: String,
    pub closed_goal: f64,
    pub new_goal: f64,
}

pub struct RolloverService;

impl RolloverService {
    /// Checks whether the ledger's current month is stale and, if so,
    /// archives it and opens the month containing `today`. At most one
    /// archive happens per call: months skipped while the app sat unopened
    /// get no synthesized buckets. Must run before any budget figure is read
    /// for the session. The caller persists afterwards.
    pub fn run(state: &mut LedgerState, today: NaiveDate) -> Option<RolloverReport> {
        let now_key = month_key(today);
        if state.current_month == now_key {
            return None;
        }

        // The frozen goal is evaluated as if we were still inside the
        // outgoing month, with its transactions still counted as current.
        let goal_date = first_day_of(&state.current_month).unwrap_or(today);
        let closed_goal = round_currency(dynamic_monthly_goal(state, goal_date));

        let closed_month = std::mem::replace(&mut state.current_month, now_key);
        let transactions = std::mem::take(&mut state.transactions);
        state.history.insert(
            closed_month.clone(),
            MonthBucket {
                goal: closed_goal,
                transactions,
            },
        );

        Self::prune_history(state, today);

        let new_goal = dynamic_monthly_goal(state, today);
        tracing::info!(
            %closed_month,
            closed_goal,
            new_goal,
            "archived month and opened {}",
            state.current_month
        );
        Some(RolloverReport {
            closed_month,
            closed_goal,
            new_goal,
        })
    }

    /// Drops every history bucket older than last calendar year. The window
    /// is calendar-based: a bucket from January of last year survives until
    /// the first rollover of next year.
    pub fn prune_history(state: &mut LedgerState, today: NaiveDate) {
        let cutoff = today.year() - 1;
        state
            .history
            .retain(|key, _| matches!(year_of(key), Some(year) if year >= cutoff));
    }
}
