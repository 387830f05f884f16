//! PostgreSQL implementation of the eligibility engine's storage port.
//!
//! Every call runs on one open transaction. The report counter row is locked
//! `FOR UPDATE` when the sequence is reserved, which serializes concurrent
//! report creators until the transaction ends.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use expensa_core::eligibility::{
    ConflictingReport, CreatedReport, LedgerError, NewReport, ReportLedger, RollingWindow,
};
use expensa_core::expense::Expense;
use expensa_core::report::Notification;
use expensa_core::tier::Tier;
use expensa_shared::types::{ExpenseId, UserId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::convert::{report_from_model, tier_from_models};
use crate::entities::{
    expenses, notifications, report_expenses, report_sequences, reports,
    sea_orm_active_enums::{ExpenseStatus, ReportStatus},
    tier_categories, tiers, users,
};

/// Statuses counted as active, as stored.
pub(crate) const ACTIVE_STATUSES: [ReportStatus; 2] =
    [ReportStatus::Approved, ReportStatus::Reimbursed];

#[allow(clippy::needless_pass_by_value)]
fn storage(e: DbErr) -> LedgerError {
    LedgerError::Storage(e.to_string())
}

fn uuids(ids: &[ExpenseId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_inner()).collect()
}

/// A [`ReportLedger`] bound to an open database transaction.
pub struct PgReportLedger<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> PgReportLedger<'a> {
    /// Creates a ledger over `txn`. The caller commits or rolls back.
    #[must_use]
    pub const fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl ReportLedger for PgReportLedger<'_> {
    async fn next_report_sequence(&self) -> Result<u64, LedgerError> {
        let counter = report_sequences::Entity::find_by_id(report_sequences::COUNTER_ID)
            .lock_exclusive()
            .one(self.txn)
            .await
            .map_err(storage)?
            .ok_or_else(|| LedgerError::Storage("report sequence row missing".to_string()))?;

        u64::try_from(counter.last_value)
            .map(|last| last + 1)
            .map_err(|_| LedgerError::Storage("report sequence is negative".to_string()))
    }

    async fn load_expenses(&self, ids: &[ExpenseId]) -> Result<Vec<Expense>, LedgerError> {
        let rows = expenses::Entity::find()
            .filter(expenses::Column::Id.is_in(uuids(ids)))
            .all(self.txn)
            .await
            .map_err(storage)?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn load_tier(&self, user: UserId) -> Result<Tier, LedgerError> {
        let user = users::Entity::find_by_id(user.into_inner())
            .one(self.txn)
            .await
            .map_err(storage)?
            .ok_or(LedgerError::UserNotFound)?;

        let tier_id = user.tier_id.ok_or(LedgerError::TierNotAssigned)?;

        let tier = tiers::Entity::find_by_id(tier_id)
            .one(self.txn)
            .await
            .map_err(storage)?
            .ok_or(LedgerError::TierNotAssigned)?;

        let categories = tier_categories::Entity::find()
            .filter(tier_categories::Column::TierId.eq(tier_id))
            .order_by_asc(tier_categories::Column::Title)
            .all(self.txn)
            .await
            .map_err(storage)?;

        Ok(tier_from_models(tier, categories))
    }

    async fn find_active_report_containing(
        &self,
        ids: &[ExpenseId],
    ) -> Result<Option<ConflictingReport>, LedgerError> {
        let report_ids: Vec<Uuid> = report_expenses::Entity::find()
            .filter(report_expenses::Column::ExpenseId.is_in(uuids(ids)))
            .select_only()
            .column(report_expenses::Column::ReportId)
            .distinct()
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(storage)?;

        if report_ids.is_empty() {
            return Ok(None);
        }

        let report = reports::Entity::find()
            .filter(reports::Column::Id.is_in(report_ids))
            .filter(reports::Column::Status.is_in(ACTIVE_STATUSES))
            .order_by_asc(reports::Column::CreatedAt)
            .one(self.txn)
            .await
            .map_err(storage)?;

        Ok(report.map(|r| ConflictingReport {
            id: r.id.into(),
            title: r.title,
        }))
    }

    async fn active_spend_between(&self, window: RollingWindow) -> Result<Decimal, LedgerError> {
        let report_ids: Vec<Uuid> = reports::Entity::find()
            .filter(reports::Column::Status.is_in(ACTIVE_STATUSES))
            .filter(reports::Column::ReportDate.gte(window.from))
            .filter(reports::Column::ReportDate.lte(window.to))
            .select_only()
            .column(reports::Column::Id)
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(storage)?;

        if report_ids.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let expense_ids: Vec<Uuid> = report_expenses::Entity::find()
            .filter(report_expenses::Column::ReportId.is_in(report_ids))
            .select_only()
            .column(report_expenses::Column::ExpenseId)
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(storage)?;

        if expense_ids.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let amounts: Vec<Decimal> = expenses::Entity::find()
            .filter(expenses::Column::Id.is_in(expense_ids))
            .select_only()
            .column(expenses::Column::Amount)
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(storage)?;

        Ok(amounts.into_iter().sum::<Decimal>().normalize())
    }

    async fn commit_report(&self, new: NewReport) -> Result<CreatedReport, LedgerError> {
        let now = Utc::now();
        let candidate_ids = uuids(&new.expense_ids);
        let expected = u64::try_from(candidate_ids.len())
            .map_err(|_| LedgerError::Storage("too many expenses".to_string()))?;

        // Only rows still unmapped may flip; anything less means another request got there first.
        let mapped = expenses::Entity::update_many()
            .col_expr(expenses::Column::Status, ExpenseStatus::Mapped.as_enum())
            .filter(expenses::Column::Id.is_in(candidate_ids.clone()))
            .filter(expenses::Column::Status.eq(ExpenseStatus::Unmapped))
            .exec(self.txn)
            .await
            .map_err(storage)?;

        if mapped.rows_affected != expected {
            return Err(LedgerError::ConcurrentModification);
        }

        let report_id = Uuid::now_v7();
        let report = reports::ActiveModel {
            id: Set(report_id),
            report_code: Set(new.code.to_string()),
            owner_id: Set(new.owner_id.into_inner()),
            title: Set(new.title),
            report_date: Set(new.report_date),
            status: Set(ReportStatus::Pending),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.txn)
        .await
        .map_err(storage)?;

        let links = candidate_ids
            .iter()
            .enumerate()
            .map(|(position, expense_id)| {
                Ok(report_expenses::ActiveModel {
                    report_id: Set(report_id),
                    expense_id: Set(*expense_id),
                    position: Set(i32::try_from(position).map_err(|_| {
                        LedgerError::Storage("too many expenses".to_string())
                    })?),
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        report_expenses::Entity::insert_many(links)
            .exec(self.txn)
            .await
            .map_err(storage)?;

        let notification = notifications::ActiveModel {
            id: Set(Uuid::now_v7()),
            report_id: Set(report_id),
            owner_id: Set(report.owner_id),
            status: Set(report.status),
            created_at: Set(now.into()),
        }
        .insert(self.txn)
        .await
        .map_err(storage)?;

        let sequence = i64::try_from(new.sequence)
            .map_err(|_| LedgerError::Storage("report sequence overflow".to_string()))?;
        report_sequences::ActiveModel {
            id: Set(report_sequences::COUNTER_ID),
            last_value: Set(sequence),
        }
        .update(self.txn)
        .await
        .map_err(storage)?;

        Ok(CreatedReport {
            report: report_from_model(report, new.expense_ids),
            notification: Notification::from(notification),
        })
    }
}

/// Loads ordered expense IDs for each report.
pub(crate) async fn expense_ids_by_report<C: sea_orm::ConnectionTrait>(
    conn: &C,
    report_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<Uuid>>, DbErr> {
    let links = report_expenses::Entity::find()
        .filter(report_expenses::Column::ReportId.is_in(report_ids))
        .order_by_asc(report_expenses::Column::Position)
        .all(conn)
        .await?;

    let mut by_report: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        by_report.entry(link.report_id).or_default().push(link.expense_id);
    }
    Ok(by_report)
}
