//! Expenses: the line items users bundle into reports.

pub mod error;
pub mod service;
pub mod types;

pub use error::ExpenseError;
pub use service::ExpenseService;
pub use types::{CreateExpenseInput, Expense, ExpenseStatus};
