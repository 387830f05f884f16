//! Entity re-exports.

pub use super::event_staff::Entity as EventStaff;
pub use super::events::Entity as Events;
pub use super::expenses::Entity as Expenses;
pub use super::notifications::Entity as Notifications;
pub use super::report_expenses::Entity as ReportExpenses;
pub use super::report_sequences::Entity as ReportSequences;
pub use super::reports::Entity as Reports;
pub use super::tier_categories::Entity as TierCategories;
pub use super::tiers::Entity as Tiers;
pub use super::users::Entity as Users;
