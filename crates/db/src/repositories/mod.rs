//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod event;
pub mod expense;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod tier;
pub mod user;

pub use event::EventRepository;
pub use expense::ExpenseRepository;
pub use ledger::PgReportLedger;
pub use notification::NotificationRepository;
pub use report::ReportRepository;
pub use tier::{CreateTierCategoryInput, CreateTierInput, TierRepository};
pub use user::{CreateUserInput, UserRepository};
