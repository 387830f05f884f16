//! Eligibility data types.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use expensa_shared::types::{ExpenseId, ReportId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::{Notification, Report, ReportCode};

/// Length of the rolling spend window, in days.
pub const ROLLING_WINDOW_DAYS: u64 = 30;

/// Per-category batch totals, ordered by category title.
pub type CategoryTotals = BTreeMap<String, Decimal>;

/// Request to bundle expenses into a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReportRequest {
    /// Report title.
    pub title: String,
    /// Date the report is filed for.
    pub report_date: NaiveDate,
    /// Candidate expenses, in report order.
    #[serde(rename = "expenses")]
    pub expense_ids: Vec<ExpenseId>,
}

/// Inclusive date range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingWindow {
    /// First day in the window.
    pub from: NaiveDate,
    /// Last day in the window.
    pub to: NaiveDate,
}

impl RollingWindow {
    /// The window of [`ROLLING_WINDOW_DAYS`] days ending on `today`, both ends inclusive.
    #[must_use]
    pub fn ending(today: NaiveDate) -> Self {
        let from = today
            .checked_sub_days(Days::new(ROLLING_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// An active report that already references a candidate expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingReport {
    /// Report ID.
    pub id: ReportId,
    /// Report title.
    pub title: String,
}

/// A report that passed every check and is ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    /// Sequence number reserved in step 1.
    pub sequence: u64,
    /// Code derived from `sequence`.
    pub code: ReportCode,
    /// Acting user.
    pub owner_id: UserId,
    /// Report title.
    pub title: String,
    /// Date the report is filed for.
    pub report_date: NaiveDate,
    /// Expenses to map, in report order.
    pub expense_ids: Vec<ExpenseId>,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedReport {
    /// The persisted report.
    pub report: Report,
    /// The notification raised for it.
    pub notification: Notification,
}

#[cfg(test)]
mod window_tests {
    use super::*;

    #[test]
    fn test_window_is_inclusive() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let window = RollingWindow::ending(today);

        assert_eq!(window.from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(window.contains(window.from));
        assert!(window.contains(today));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn test_request_uses_expenses_key() {
        let id = ExpenseId::new();
        let json = format!(r#"{{"title":"Trip","report_date":"2024-03-01","expenses":["{id}"]}}"#);
        let request: CreateReportRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.expense_ids, vec![id]);
    }
}
