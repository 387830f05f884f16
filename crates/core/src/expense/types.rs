//! Expense data types.

use chrono::{DateTime, Utc};
use expensa_shared::types::{ExpenseId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an expense has been consolidated into a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    /// Not yet part of any report.
    #[default]
    Unmapped,
    /// Consolidated into a report.
    Mapped,
}

impl ExpenseStatus {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unmapped => "unmapped",
            Self::Mapped => "mapped",
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// User who filed the expense.
    pub owner_id: UserId,
    /// Short description.
    pub title: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Category tag, matched against tier category titles.
    pub category: String,
    /// Mapping status.
    pub status: ExpenseStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Returns true if the expense is already in a report.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.status == ExpenseStatus::Mapped
    }
}

/// Input for filing a new expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateExpenseInput {
    /// Short description.
    pub title: String,
    /// Amount, must be positive.
    pub amount: Decimal,
    /// Category tag.
    pub category: String,
}
