//! Edits to existing transactions, including moves between the live month
//! and archived buckets when the date changes month.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::currency::round_currency;
use crate::errors::{BudgetError, Result};
use crate::ledger::{validate_amount, BucketRef, LedgerState, MonthBucket, TransactionKind};
use crate::time::month_key;

/// Requested field values for an edit. A `date` of `None` keeps the
/// transaction where it is; `time` always replaces the stored value so a
/// cleared field clears it.
#[derive(Debug, Clone)]
pub struct TransactionPatch {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

pub struct TransactionEditor;

impl TransactionEditor {
    /// Applies `patch` to the transaction `id` inside `source`, relocating it
    /// when the new date lands in a different month. Validation happens
    /// before anything is touched, and a cross-bucket move is a single
    /// remove-then-insert, so no intermediate state is observable. Returns
    /// the bucket the transaction lives in afterwards.
    pub fn edit(
        state: &mut LedgerState,
        id: Uuid,
        source: &BucketRef,
        patch: TransactionPatch,
    ) -> Result<BucketRef> {
        validate_amount(patch.amount)?;

        let position = state
            .bucket_transactions(source)
            .and_then(|txs| txs.iter().position(|txn| txn.id == id))
            .ok_or(BudgetError::TransactionNotFound(id))?;

        let description = if patch.description.trim().is_empty() {
            patch.kind.default_description().to_string()
        } else {
            patch.description.trim().to_string()
        };
        let amount = patch.kind.signed(round_currency(patch.amount));

        let dest = match patch.date {
            Some(date) => state.bucket_for_key(&month_key(date)),
            None => source.clone(),
        };

        if dest == *source {
            if let Some(txs) = state.bucket_transactions_mut(source) {
                let txn = &mut txs[position];
                txn.amount = amount;
                txn.description = description;
                if let Some(date) = patch.date {
                    txn.date = date;
                }
                txn.time = patch.time;
            }
            return Ok(dest);
        }

        let mut txn = match state.bucket_transactions_mut(source) {
            Some(txs) => txs.remove(position),
            None => return Err(BudgetError::TransactionNotFound(id)),
        };
        txn.amount = amount;
        txn.description = description;
        if let Some(date) = patch.date {
            txn.date = date;
        }
        txn.time = patch.time;

        let dest_list = match &dest {
            BucketRef::Current => &mut state.transactions,
            BucketRef::History(key) => {
                // A bucket synthesized here keeps goal 0: rollover only ever
                // archives the then-current month, so nothing backfills it.
                &mut state
                    .history
                    .entry(key.clone())
                    .or_insert_with(MonthBucket::default)
                    .transactions
            }
        };
        dest_list.insert(0, txn);
        // Relocation is the one place ordering is by date, not insertion:
        // stable sort keeps the existing relative order for same-day entries.
        dest_list.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(dest)
    }

    /// Removes `id` from `bucket`; missing ids are ignored.
    pub fn delete(state: &mut LedgerState, id: Uuid, bucket: &BucketRef) {
        state.delete_transaction(id, bucket);
    }
}
