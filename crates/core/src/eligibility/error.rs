//! Eligibility error types.

use expensa_shared::types::ExpenseId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Coarse classification of an [`EligibilityError`], used for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// The batch collides with existing state.
    Conflict,
    /// A category or rolling cap would be exceeded.
    LimitExceeded,
    /// The batch uses a disabled category.
    DisabledCategory,
    /// Storage failure.
    Internal,
}

/// Reasons a report cannot be created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EligibilityError {
    /// No expenses were submitted.
    #[error("At least one expense is required")]
    EmptyBatch,

    /// Report title is blank.
    #[error("Report title is required")]
    BlankTitle,

    /// An expense is missing or belongs to someone else.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// Acting user does not exist.
    #[error("User not found")]
    UserNotFound,

    /// Acting user has no tier.
    #[error("No tier is assigned to this user")]
    TierNotAssigned,

    /// An expense is already part of a report.
    #[error("Expense with title {title} is already mapped.")]
    ExpenseAlreadyMapped {
        /// Title of the offending expense.
        title: String,
    },

    /// The batch uses a category the tier disables.
    #[error("Category {category} is disabled.")]
    CategoryDisabled {
        /// Category title.
        category: String,
    },

    /// The batch total for a category exceeds the tier cap.
    #[error("Total amount for category {category} exceeds the maximum allowed.")]
    CategoryLimitExceeded {
        /// Category title.
        category: String,
    },

    /// An active report already references a candidate expense.
    #[error("{report_title} already includes some of the selected expenses.")]
    ExpensesInActiveReport {
        /// Title of the conflicting report.
        report_title: String,
    },

    /// Active spend in the rolling window is above the tier ceiling.
    #[error(
        "The total amount of existing reports within the last 30 days exceeds your tier limit of {limit}."
    )]
    RollingLimitExceeded {
        /// The tier ceiling.
        limit: Decimal,
    },

    /// Another request mapped a candidate expense first.
    #[error("Some of the selected expenses were modified by another request")]
    ConcurrentModification,

    /// Storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EligibilityError {
    /// Returns the error's classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyBatch | Self::BlankTitle => ErrorKind::Validation,
            Self::ExpenseNotFound(_) | Self::UserNotFound | Self::TierNotAssigned => {
                ErrorKind::NotFound
            }
            Self::ExpenseAlreadyMapped { .. }
            | Self::ExpensesInActiveReport { .. }
            | Self::ConcurrentModification => ErrorKind::Conflict,
            Self::CategoryLimitExceeded { .. } | Self::RollingLimitExceeded { .. } => {
                ErrorKind::LimitExceeded
            }
            Self::CategoryDisabled { .. } => ErrorKind::DisabledCategory,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// Errors raised by a [`ReportLedger`](super::ReportLedger) implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Acting user does not exist.
    #[error("User not found")]
    UserNotFound,

    /// Acting user has no tier.
    #[error("No tier is assigned to this user")]
    TierNotAssigned,

    /// The conditional expense update touched fewer rows than expected.
    #[error("Concurrent modification of expenses")]
    ConcurrentModification,

    /// Underlying storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<LedgerError> for EligibilityError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UserNotFound => Self::UserNotFound,
            LedgerError::TierNotAssigned => Self::TierNotAssigned,
            LedgerError::ConcurrentModification => Self::ConcurrentModification,
            LedgerError::Storage(msg) => Self::Storage(msg),
        }
    }
}
