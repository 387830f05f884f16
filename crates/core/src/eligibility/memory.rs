//! In-memory ledger for engine tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use expensa_shared::types::{ExpenseId, NotificationId, ReportId, UserId};
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::ledger::ReportLedger;
use super::types::{ConflictingReport, CreatedReport, NewReport, RollingWindow};
use crate::expense::{Expense, ExpenseStatus};
use crate::report::{Notification, Report, ReportCode, ReportStatus};
use crate::tier::Tier;

#[derive(Default)]
struct State {
    sequence: u64,
    expenses: HashMap<ExpenseId, Expense>,
    tiers: HashMap<UserId, Tier>,
    reports: Vec<Report>,
    notifications: Vec<Notification>,
    race_on_commit: Option<ExpenseId>,
    fail_commit: bool,
}

/// A `ReportLedger` backed by a mutex-guarded map. Commits are all-or-nothing.
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<State>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_expense(&self, expense: Expense) {
        self.state.lock().unwrap().expenses.insert(expense.id, expense);
    }

    pub fn assign_tier(&self, user: UserId, tier: Tier) {
        self.state.lock().unwrap().tiers.insert(user, tier);
    }

    /// Inserts a pre-existing report without touching expense status.
    pub fn add_report(
        &self,
        owner: UserId,
        title: &str,
        report_date: NaiveDate,
        status: ReportStatus,
        expense_ids: Vec<ExpenseId>,
    ) -> ReportId {
        let mut state = self.state.lock().unwrap();
        state.sequence += 1;
        let report = Report {
            id: ReportId::new(),
            code: ReportCode::from_sequence(state.sequence),
            owner_id: owner,
            title: title.to_string(),
            report_date,
            status,
            expense_ids,
            created_at: Utc::now(),
        };
        let id = report.id;
        state.reports.push(report);
        id
    }

    /// Marks `id` mapped just before the next commit applies, as a racing request would.
    pub fn race_on_commit(&self, id: ExpenseId) {
        self.state.lock().unwrap().race_on_commit = Some(id);
    }

    pub fn fail_commit(&self) {
        self.state.lock().unwrap().fail_commit = true;
    }

    pub fn expense(&self, id: ExpenseId) -> Expense {
        self.state.lock().unwrap().expenses[&id].clone()
    }

    pub fn report(&self, id: ReportId) -> Option<Report> {
        self.state
            .lock()
            .unwrap()
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn report_count(&self) -> usize {
        self.state.lock().unwrap().reports.len()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.lock().unwrap().notifications.clone()
    }
}

#[async_trait]
impl ReportLedger for InMemoryLedger {
    async fn next_report_sequence(&self) -> Result<u64, LedgerError> {
        Ok(self.state.lock().unwrap().sequence + 1)
    }

    async fn load_expenses(&self, ids: &[ExpenseId]) -> Result<Vec<Expense>, LedgerError> {
        let state = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| state.expenses.get(id).cloned())
            .collect())
    }

    async fn load_tier(&self, user: UserId) -> Result<Tier, LedgerError> {
        self.state
            .lock()
            .unwrap()
            .tiers
            .get(&user)
            .cloned()
            .ok_or(LedgerError::TierNotAssigned)
    }

    async fn find_active_report_containing(
        &self,
        ids: &[ExpenseId],
    ) -> Result<Option<ConflictingReport>, LedgerError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reports
            .iter()
            .filter(|r| r.status.is_active())
            .find(|r| r.expense_ids.iter().any(|id| ids.contains(id)))
            .map(|r| ConflictingReport {
                id: r.id,
                title: r.title.clone(),
            }))
    }

    async fn active_spend_between(&self, window: RollingWindow) -> Result<Decimal, LedgerError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reports
            .iter()
            .filter(|r| r.status.is_active() && window.contains(r.report_date))
            .flat_map(|r| r.expense_ids.iter())
            .filter_map(|id| state.expenses.get(id))
            .map(|e| e.amount)
            .sum())
    }

    async fn commit_report(&self, new: NewReport) -> Result<CreatedReport, LedgerError> {
        let mut state = self.state.lock().unwrap();

        if let Some(raced) = state.race_on_commit.take() {
            if let Some(expense) = state.expenses.get_mut(&raced) {
                expense.status = ExpenseStatus::Mapped;
            }
        }

        if state.fail_commit {
            return Err(LedgerError::Storage("connection reset".to_string()));
        }

        let mappable = new
            .expense_ids
            .iter()
            .filter(|id| {
                state
                    .expenses
                    .get(id)
                    .is_some_and(|e| e.status == ExpenseStatus::Unmapped)
            })
            .count();
        if mappable != new.expense_ids.len() {
            return Err(LedgerError::ConcurrentModification);
        }

        for id in &new.expense_ids {
            if let Some(expense) = state.expenses.get_mut(id) {
                expense.status = ExpenseStatus::Mapped;
            }
        }

        let now = Utc::now();
        let report = Report {
            id: ReportId::new(),
            code: new.code,
            owner_id: new.owner_id,
            title: new.title,
            report_date: new.report_date,
            status: ReportStatus::Pending,
            expense_ids: new.expense_ids,
            created_at: now,
        };
        let notification = Notification {
            id: NotificationId::new(),
            report_id: report.id,
            owner_id: report.owner_id,
            status: report.status,
            created_at: now,
        };

        state.sequence = new.sequence;
        state.reports.push(report.clone());
        state.notifications.push(notification.clone());

        Ok(CreatedReport {
            report,
            notification,
        })
    }
}
