pub mod budget;
pub mod transaction;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BudgetError, Result};

pub use transaction::{Transaction, TransactionKind};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// User-tunable settings. The annual budget feeds the dynamic allowance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub annual_budget: f64,
}

/// An archived month: the allowance frozen at rollover time plus the entries
/// recorded while the month was live.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthBucket {
    pub goal: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Names a transaction container: the live current-month list or an archived
/// month keyed by `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketRef {
    Current,
    History(String),
}

/// Root ledger state: the live month plus the bounded archive. A transaction
/// id appears in at most one bucket at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    #[serde(default = "LedgerState::schema_version_default")]
    pub version: u32,
    #[serde(default)]
    pub settings: Settings,
    pub current_month: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub history: BTreeMap<String, MonthBucket>,
}

impl LedgerState {
    pub fn new(current_month: impl Into<String>) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            settings: Settings::default(),
            current_month: current_month.into(),
            transactions: Vec::new(),
            history: BTreeMap::new(),
        }
    }

    pub fn schema_version_default() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    /// Records a new entry at the head of the current-month list, so the list
    /// stays most-recent-first by insertion order.
    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        magnitude: f64,
        description: &str,
        date: NaiveDate,
        time: Option<String>,
    ) -> Result<Uuid> {
        validate_amount(magnitude)?;
        let description = if description.trim().is_empty() {
            kind.default_description().to_string()
        } else {
            description.trim().to_string()
        };
        let txn = Transaction::new(kind, magnitude, description, date, time);
        let id = txn.id;
        self.transactions.insert(0, txn);
        Ok(id)
    }

    /// Removes `id` from the named bucket. Missing ids are ignored, so the
    /// operation is idempotent.
    pub fn delete_transaction(&mut self, id: Uuid, bucket: &BucketRef) {
        match bucket {
            BucketRef::Current => self.transactions.retain(|txn| txn.id != id),
            BucketRef::History(key) => {
                if let Some(entry) = self.history.get_mut(key) {
                    entry.transactions.retain(|txn| txn.id != id);
                }
            }
        }
    }

    pub fn bucket_transactions(&self, bucket: &BucketRef) -> Option<&[Transaction]> {
        match bucket {
            BucketRef::Current => Some(&self.transactions),
            BucketRef::History(key) => self
                .history
                .get(key)
                .map(|entry| entry.transactions.as_slice()),
        }
    }

    pub(crate) fn bucket_transactions_mut(
        &mut self,
        bucket: &BucketRef,
    ) -> Option<&mut Vec<Transaction>> {
        match bucket {
            BucketRef::Current => Some(&mut self.transactions),
            BucketRef::History(key) => self
                .history
                .get_mut(key)
                .map(|entry| &mut entry.transactions),
        }
    }

    /// Resolves the bucket a month key addresses relative to the live month.
    pub fn bucket_for_key(&self, key: &str) -> BucketRef {
        if key == self.current_month {
            BucketRef::Current
        } else {
            BucketRef::History(key.to_string())
        }
    }

    /// Iterates every transaction across the live month and the archive.
    pub fn all_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().chain(
            self.history
                .values()
                .flat_map(|bucket| bucket.transactions.iter()),
        )
    }
}

pub(crate) fn validate_amount(magnitude: f64) -> Result<()> {
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return Err(BudgetError::Validation(format!(
            "amount must be a positive number, got {magnitude}"
        )));
    }
    Ok(())
}

/// Total magnitude of expense entries.
pub fn sum_expenses(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.amount < 0.0)
        .map(|txn| -txn.amount)
        .sum()
}

/// Total magnitude of income entries.
pub fn sum_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.amount > 0.0)
        .map(|txn| txn.amount)
        .sum()
}

/// Net spend: expenses minus income. Positive means money went out on balance.
pub fn net_of(transactions: &[Transaction]) -> f64 {
    sum_expenses(transactions) - sum_income(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BudgetError;

    fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_state() -> LedgerState {
        LedgerState::new("2024-03")
    }

    #[test]
    fn add_applies_sign_by_kind() {
        let mut state = base_state();
        state
            .add_transaction(
                TransactionKind::Expense,
                30.0,
                "Lunch",
                sample_date(2024, 3, 4),
                None,
            )
            .unwrap();
        state
            .add_transaction(
                TransactionKind::Income,
                100.0,
                "Refund",
                sample_date(2024, 3, 5),
                None,
            )
            .unwrap();
        assert_eq!(state.transactions[0].amount, 100.0);
        assert_eq!(state.transactions[1].amount, -30.0);
    }

    #[test]
    fn newest_insert_is_always_first() {
        let mut state = base_state();
        let date = sample_date(2024, 3, 10);
        state
            .add_transaction(TransactionKind::Expense, 1.0, "first", date, None)
            .unwrap();
        state
            .add_transaction(TransactionKind::Expense, 2.0, "second", date, None)
            .unwrap();
        state
            .add_transaction(TransactionKind::Expense, 3.0, "third", date, None)
            .unwrap();
        let descriptions: Vec<_> = state
            .transactions
            .iter()
            .map(|txn| txn.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["third", "second", "first"]);
    }

    #[test]
    fn add_rejects_non_positive_amounts() {
        let mut state = base_state();
        let date = sample_date(2024, 3, 1);
        for magnitude in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = state
                .add_transaction(TransactionKind::Expense, magnitude, "bad", date, None)
                .expect_err("non-positive amount must fail");
            assert!(matches!(err, BudgetError::Validation(_)));
        }
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn blank_description_falls_back_to_kind_label() {
        let mut state = base_state();
        state
            .add_transaction(
                TransactionKind::Income,
                10.0,
                "   ",
                sample_date(2024, 3, 2),
                None,
            )
            .unwrap();
        assert_eq!(state.transactions[0].description, "Income");
    }

    #[test]
    fn delete_is_idempotent() {
        let mut state = base_state();
        let id = state
            .add_transaction(
                TransactionKind::Expense,
                12.0,
                "Coffee",
                sample_date(2024, 3, 3),
                None,
            )
            .unwrap();
        state.delete_transaction(id, &BucketRef::Current);
        assert!(state.transactions.is_empty());
        state.delete_transaction(id, &BucketRef::Current);
        assert!(state.transactions.is_empty());

        // Deleting from a history key that does not exist is also a no-op.
        state.delete_transaction(id, &BucketRef::History("2023-01".into()));
    }

    #[test]
    fn sums_partition_by_sign() {
        let date = sample_date(2024, 3, 6);
        let txs = vec![
            Transaction::new(TransactionKind::Expense, 40.0, "a", date, None),
            Transaction::new(TransactionKind::Expense, 10.0, "b", date, None),
            Transaction::new(TransactionKind::Income, 30.0, "c", date, None),
        ];
        assert_eq!(sum_expenses(&txs), 50.0);
        assert_eq!(sum_income(&txs), 30.0);
        assert_eq!(net_of(&txs), 20.0);
    }

    #[test]
    fn zero_amount_entries_from_imports_do_not_move_the_net() {
        let date = sample_date(2024, 3, 7);
        let mut txs = vec![Transaction::new(
            TransactionKind::Expense,
            25.0,
            "real",
            date,
            None,
        )];
        let mut zero = Transaction::new(TransactionKind::Income, 1.0, "ghost", date, None);
        zero.amount = 0.0;
        txs.push(zero);
        assert_eq!(net_of(&txs), 25.0);
    }

    #[test]
    fn bucket_for_key_distinguishes_live_month() {
        let state = base_state();
        assert_eq!(state.bucket_for_key("2024-03"), BucketRef::Current);
        assert_eq!(
            state.bucket_for_key("2024-02"),
            BucketRef::History("2024-02".into())
        );
    }
}
