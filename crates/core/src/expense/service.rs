//! Expense validation.

use rust_decimal::Decimal;

use super::error::ExpenseError;
use super::types::CreateExpenseInput;

/// Maximum length of an expense title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Expense service for business logic.
pub struct ExpenseService;

impl ExpenseService {
    /// Validates and normalizes a new expense.
    ///
    /// Title and category are trimmed.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: `EmptyTitle`, `TitleTooLong`,
    /// `NonPositiveAmount`, then `EmptyCategory`.
    pub fn validate_new(input: CreateExpenseInput) -> Result<CreateExpenseInput, ExpenseError> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(ExpenseError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ExpenseError::TitleTooLong(MAX_TITLE_LEN));
        }

        if input.amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount);
        }

        let category = input.category.trim().to_string();
        if category.is_empty() {
            return Err(ExpenseError::EmptyCategory);
        }

        Ok(CreateExpenseInput {
            title,
            amount: input.amount,
            category,
        })
    }
}
