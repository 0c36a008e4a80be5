use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::round_currency;

/// A single dated ledger entry. Negative amounts are expenses, positive
/// amounts income; zero amounts are rejected on entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub amount: f64,
    pub description: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        magnitude: f64,
        description: impl Into<String>,
        date: NaiveDate,
        time: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            time,
            amount: kind.signed(round_currency(magnitude)),
            description: description.into(),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn kind(&self) -> TransactionKind {
        if self.is_income() {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    /// Applies the sign convention to a positive magnitude.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            TransactionKind::Expense => -magnitude,
            TransactionKind::Income => magnitude,
        }
    }

    /// Fallback description when the user leaves the field blank.
    pub fn default_description(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        }
    }
}
