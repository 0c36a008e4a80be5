use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for ledger, budget, and storage layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Malformed import document: {0}")]
    MalformedImport(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}
