//! Export/import document shape and validation. Collaborators handle the
//! file plumbing; this module only defines the serialized form and the
//! checks an import candidate must pass before it replaces any state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{BudgetError, Result};
use crate::ledger::LedgerState;
use crate::time::is_month_key;

/// Full ledger snapshot plus the moment it was taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: LedgerState,
}

pub fn export_document(state: &LedgerState, now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        exported_at: now,
        state: state.clone(),
    }
}

/// Checks the minimal shape of an import candidate without mutating
/// anything: a `settings` object and a `transactions` array must be present,
/// and every month key must be well-formed `YYYY-MM`.
pub fn validate_import(candidate: &Value) -> Result<()> {
    let object = candidate
        .as_object()
        .ok_or_else(|| BudgetError::MalformedImport("document is not an object".into()))?;
    if !object.get("settings").map(Value::is_object).unwrap_or(false) {
        return Err(BudgetError::MalformedImport(
            "missing `settings` object".into(),
        ));
    }
    if !object
        .get("transactions")
        .map(Value::is_array)
        .unwrap_or(false)
    {
        return Err(BudgetError::MalformedImport(
            "missing `transactions` array".into(),
        ));
    }
    if let Some(month) = object.get("currentMonth").and_then(Value::as_str) {
        if !is_month_key(month) {
            return Err(BudgetError::MalformedImport(format!(
                "invalid month key `{month}`"
            )));
        }
    }
    if let Some(history) = object.get("history").and_then(Value::as_object) {
        if let Some(bad) = history.keys().find(|key| !is_month_key(key)) {
            return Err(BudgetError::MalformedImport(format!(
                "invalid month key `{bad}` in history"
            )));
        }
    }
    Ok(())
}

/// Validates and deserializes an import candidate into a full ledger state.
/// Extra fields such as `exportedAt` are tolerated and ignored.
pub fn import_state(candidate: Value) -> Result<LedgerState> {
    validate_import(&candidate)?;
    serde_json::from_value(candidate).map_err(|err| BudgetError::MalformedImport(err.to_string()))
}
