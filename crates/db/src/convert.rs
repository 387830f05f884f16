//! Conversions from database models to domain types.

use expensa_core::event::Event;
use expensa_core::expense::Expense;
use expensa_core::report::{Notification, Report, ReportCode};
use expensa_core::tier::{Tier, TierCategory};
use expensa_shared::types::{ExpenseId, UserId};

use crate::entities::{events, expenses, notifications, reports, tier_categories, tiers};

impl From<expenses::Model> for Expense {
    fn from(model: expenses::Model) -> Self {
        Self {
            id: model.id.into(),
            owner_id: model.owner_id.into(),
            title: model.title,
            amount: model.amount.normalize(),
            category: model.category,
            status: model.status.into(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<tier_categories::Model> for TierCategory {
    fn from(model: tier_categories::Model) -> Self {
        Self {
            title: model.title,
            max_amount: model.max_amount.normalize(),
            status: model.status.into(),
        }
    }
}

/// Builds a domain tier from its row and category rows.
pub fn tier_from_models(tier: tiers::Model, categories: Vec<tier_categories::Model>) -> Tier {
    Tier {
        id: tier.id.into(),
        name: tier.name,
        categories: categories.into_iter().map(Into::into).collect(),
        total_amount: tier.total_amount.normalize(),
    }
}

/// Builds a domain report from its row and ordered expense IDs.
pub fn report_from_model(model: reports::Model, expense_ids: Vec<ExpenseId>) -> Report {
    Report {
        id: model.id.into(),
        code: ReportCode::from(model.report_code),
        owner_id: model.owner_id.into(),
        title: model.title,
        report_date: model.report_date,
        status: model.status.into(),
        expense_ids,
        created_at: model.created_at.to_utc(),
    }
}

impl From<notifications::Model> for Notification {
    fn from(model: notifications::Model) -> Self {
        Self {
            id: model.id.into(),
            report_id: model.report_id.into(),
            owner_id: model.owner_id.into(),
            status: model.status.into(),
            created_at: model.created_at.to_utc(),
        }
    }
}

/// Builds a domain event from its row and rostered staff.
pub fn event_from_model(model: events::Model, staff: Vec<UserId>) -> Event {
    Event {
        id: model.id.into(),
        event_name: model.event_name,
        start_date: model.start_date,
        end_date: model.end_date,
        start_time: model.start_time,
        end_time: model.end_time,
        description: model.description,
        location: model.location,
        status: model.status,
        staff,
    }
}
