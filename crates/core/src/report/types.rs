//! Report data types.

use chrono::{DateTime, NaiveDate, Utc};
use expensa_shared::types::{ExpenseId, NotificationId, ReportId, UserId};
use serde::{Deserialize, Serialize};

/// Report lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Awaiting review. New reports start here.
    #[default]
    Pending,
    /// Approved for reimbursement.
    Approved,
    /// Paid out.
    Reimbursed,
    /// Rejected by a reviewer.
    Rejected,
}

impl ReportStatus {
    /// Statuses that count as active for conflict and rolling-limit checks.
    pub const ACTIVE: [Self; 2] = [Self::Approved, Self::Reimbursed];

    /// Returns true if the report is approved or reimbursed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Approved | Self::Reimbursed)
    }

    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Reimbursed => "reimbursed",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable sequential report code, e.g. `Rep#007`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportCode(String);

impl ReportCode {
    /// Formats a sequence number: zero-padded to three digits, wider numbers in full.
    #[must_use]
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("Rep#{sequence:03}"))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ReportCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for ReportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A report record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Report ID.
    pub id: ReportId,
    /// Sequential code.
    pub code: ReportCode,
    /// User who created the report.
    pub owner_id: UserId,
    /// Report title.
    pub title: String,
    /// Date the report is filed for.
    pub report_date: NaiveDate,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Expenses in report order.
    pub expense_ids: Vec<ExpenseId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Notification raised for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,
    /// Report the notification refers to.
    pub report_id: ReportId,
    /// Recipient.
    pub owner_id: UserId,
    /// Report status at the time the notification was raised.
    pub status: ReportStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
