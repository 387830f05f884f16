//! Expense error types.

use expensa_shared::types::ExpenseId;
use thiserror::Error;

/// Expense-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// Expense not found or not owned by the caller.
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),

    /// Title is blank.
    #[error("Title is required")]
    EmptyTitle,

    /// Title exceeds the maximum length.
    #[error("Title must be at most {0} characters")]
    TitleTooLong(usize),

    /// Amount is zero or negative.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Category is blank.
    #[error("Category is required")]
    EmptyCategory,
}
