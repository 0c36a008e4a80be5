//! Session facade coordinating ledger state, rollover, and persistence.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::currency::round_currency;
use crate::editor::{TransactionEditor, TransactionPatch};
use crate::errors::{BudgetError, Result};
use crate::export::{self, ExportDocument};
use crate::ledger::{BucketRef, LedgerState, TransactionKind};
use crate::rollover::{RolloverReport, RolloverService};
use crate::storage::StateStore;
use crate::time::month_key;

/// Owns the live ledger state and the opaque store behind it. Every mutation
/// persists immediately; a failed write surfaces the error but leaves the
/// in-memory change applied, so the session may diverge from the store until
/// the next successful write.
pub struct BudgetManager {
    state: LedgerState,
    store: Box<dyn StateStore>,
}

impl BudgetManager {
    /// Loads the stored state (or starts fresh) and runs the rollover check
    /// before anything reads budget figures for the session.
    pub fn open(
        store: Box<dyn StateStore>,
        today: NaiveDate,
    ) -> Result<(Self, Option<RolloverReport>)> {
        let loaded = store.load()?;
        let first_run = loaded.is_none();
        let mut state = loaded.unwrap_or_else(|| LedgerState::new(month_key(today)));
        let report = RolloverService::run(&mut state, today);
        let manager = Self { state, store };
        if first_run || report.is_some() {
            manager.persist()?;
        }
        Ok((manager, report))
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        magnitude: f64,
        description: &str,
        date: NaiveDate,
        time: Option<String>,
    ) -> Result<Uuid> {
        let id = self
            .state
            .add_transaction(kind, magnitude, description, date, time)?;
        self.persist()?;
        Ok(id)
    }

    pub fn edit_transaction(
        &mut self,
        id: Uuid,
        source: &BucketRef,
        patch: TransactionPatch,
    ) -> Result<BucketRef> {
        let dest = TransactionEditor::edit(&mut self.state, id, source, patch)?;
        self.persist()?;
        Ok(dest)
    }

    pub fn delete_transaction(&mut self, id: Uuid, bucket: &BucketRef) -> Result<()> {
        TransactionEditor::delete(&mut self.state, id, bucket);
        self.persist()
    }

    /// Saves a new annual budget. The allowance recomputes from it on the
    /// next read; goals already archived stay frozen.
    pub fn set_annual_budget(&mut self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(BudgetError::Validation(format!(
                "annual budget must be a non-negative number, got {amount}"
            )));
        }
        self.state.settings.annual_budget = round_currency(amount);
        self.persist()
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        export::export_document(&self.state, now)
    }

    /// Replaces the whole state with a validated import document, then
    /// re-runs the rollover check and pruning so the retention window holds
    /// for the restored history. A rejected document leaves the previous
    /// state untouched.
    pub fn import(&mut self, candidate: Value, today: NaiveDate) -> Result<Option<RolloverReport>> {
        let state = export::import_state(candidate)?;
        self.state = state;
        let report = RolloverService::run(&mut self.state, today);
        RolloverService::prune_history(&mut self.state, today);
        tracing::info!(current_month = %self.state.current_month, "import replaced ledger state");
        self.persist()?;
        Ok(report)
    }

    /// Resets to a fresh, empty ledger for the month containing `today`.
    pub fn clear(&mut self, today: NaiveDate) -> Result<()> {
        self.state = LedgerState::new(month_key(today));
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Err(err) = self.store.save(&self.state) {
            tracing::warn!(%err, "state write failed; in-memory state kept");
            return Err(err);
        }
        Ok(())
    }
}
