//! `SeaORM` entity definitions.

pub mod events;
pub mod event_staff;
pub mod expenses;
pub mod notifications;
pub mod prelude;
pub mod report_expenses;
pub mod report_sequences;
pub mod reports;
pub mod sea_orm_active_enums;
pub mod tier_categories;
pub mod tiers;
pub mod users;
