//! List and detail row types.

use expensa_shared::types::{EventId, ExpenseId, NotificationId, ReportId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::{format_date, format_time};
use crate::event::Event;
use crate::expense::{Expense, ExpenseStatus};
use crate::report::{Notification, Report, ReportStatus};

/// Which collection a list request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// The caller's reports.
    Reports,
    /// The caller's expenses.
    Expenses,
    /// The caller's notifications.
    Notifications,
    /// Events the caller is rostered onto.
    Events,
}

impl ListKind {
    /// Returns the plural noun used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reports => "reports",
            Self::Expenses => "expenses",
            Self::Notifications => "notifications",
            Self::Events => "events",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    /// The requested page holds no rows.
    #[error("No {0} found")]
    Empty(ListKind),
}

/// A report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Report ID.
    pub id: ReportId,
    /// Report title.
    pub title: String,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Sum of the report's expense amounts.
    pub total_amount: Decimal,
    /// Number of expenses in the report.
    pub expense_count: u64,
    /// Report date, formatted.
    pub date: String,
}

impl ReportSummary {
    /// Projects a report with its precomputed totals.
    #[must_use]
    pub fn new(report: &Report, total_amount: Decimal, expense_count: u64) -> Self {
        Self {
            id: report.id,
            title: report.title.clone(),
            status: report.status,
            total_amount,
            expense_count,
            date: format_date(report.report_date),
        }
    }
}

/// An expense row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    /// Expense ID.
    pub id: ExpenseId,
    /// Expense title.
    pub title: String,
    /// Mapping status.
    pub status: ExpenseStatus,
    /// Amount.
    pub amount: Decimal,
    /// Category tag.
    pub category: String,
    /// Creation date, formatted.
    pub date: String,
}

impl From<&Expense> for ExpenseSummary {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title.clone(),
            status: expense.status,
            amount: expense.amount,
            category: expense.category.clone(),
            date: format_date(expense.created_at.date_naive()),
        }
    }
}

/// A notification row, carrying figures from the referenced report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    /// Notification ID.
    pub id: NotificationId,
    /// Title of the referenced report.
    pub title: String,
    /// Status recorded on the notification.
    pub status: ReportStatus,
    /// Sum of the report's expense amounts.
    pub total_amount: Decimal,
    /// Number of expenses in the report.
    pub expense_count: u64,
    /// Creation date, formatted.
    pub date: String,
}

impl NotificationSummary {
    /// Projects a notification with figures from its report.
    #[must_use]
    pub fn new(
        notification: &Notification,
        report_title: String,
        total_amount: Decimal,
        expense_count: u64,
    ) -> Self {
        Self {
            id: notification.id,
            title: report_title,
            status: notification.status,
            total_amount,
            expense_count,
            date: format_date(notification.created_at.date_naive()),
        }
    }
}

/// An event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Event ID.
    pub id: EventId,
    /// Display name.
    pub event_name: String,
    /// First day, formatted.
    pub start_date: String,
    /// Last day, formatted.
    pub end_date: String,
    /// Start time, formatted.
    pub start_time: String,
    /// End time, formatted.
    pub end_time: String,
    /// Description.
    pub description: String,
    /// Venue.
    pub location: String,
    /// Status label.
    pub status: String,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            event_name: event.event_name.clone(),
            start_date: format_date(event.start_date),
            end_date: format_date(event.end_date),
            start_time: format_time(event.start_time),
            end_time: format_time(event.end_time),
            description: event.description.clone(),
            location: event.location.clone(),
            status: event.status.clone(),
        }
    }
}

/// An expense inside a report detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    /// Expense ID.
    pub id: ExpenseId,
    /// Expense title.
    pub title: String,
    /// Amount.
    pub amount: Decimal,
    /// Category tag.
    pub category: String,
    /// Creation date, formatted.
    pub date: String,
    /// Mapping status.
    pub status: ExpenseStatus,
}

/// Full view of one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    /// Report ID.
    pub id: ReportId,
    /// Sequential code, e.g. `Rep#001`.
    pub report_id: String,
    /// Report title.
    pub title: String,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Sum of expense amounts.
    pub total_amount: Decimal,
    /// Number of expenses.
    pub expense_count: u64,
    /// Expenses in report order.
    pub expenses: Vec<ExpenseLine>,
    /// Report date, formatted.
    pub date: String,
}

impl ReportDetail {
    /// Builds the detail view from a report and its expenses in report order.
    #[must_use]
    pub fn new(report: &Report, expenses: &[Expense]) -> Self {
        let lines: Vec<ExpenseLine> = expenses
            .iter()
            .map(|e| ExpenseLine {
                id: e.id,
                title: e.title.clone(),
                amount: e.amount,
                category: e.category.clone(),
                date: format_date(e.created_at.date_naive()),
                status: e.status,
            })
            .collect();

        Self {
            id: report.id,
            report_id: report.code.to_string(),
            title: report.title.clone(),
            status: report.status,
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            expense_count: lines.len() as u64,
            expenses: lines,
            date: format_date(report.report_date),
        }
    }
}
