//! Paginated list and detail projections.

pub mod format;
pub mod types;

pub use format::{format_date, format_time};
pub use types::{
    EventSummary, ExpenseLine, ExpenseSummary, ListKind, ListingError, NotificationSummary,
    ReportDetail, ReportSummary,
};
