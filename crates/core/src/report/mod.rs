//! Reports and the notifications raised when they are created.

pub mod types;

pub use types::{Notification, Report, ReportCode, ReportStatus};
