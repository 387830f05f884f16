//! Report repository.
//!
//! Report creation runs the eligibility engine inside one database
//! transaction. Reads project reports into list rows and detail views.

use std::collections::HashMap;

use chrono::NaiveDate;
use expensa_core::eligibility::{
    CreateReportRequest, CreatedReport, EligibilityError, ReportEligibilityEngine,
};
use expensa_core::expense::Expense;
use expensa_core::listing::{ReportDetail, ReportSummary};
use expensa_shared::types::{PageRequest, ReportId, UserId};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use super::ledger::{PgReportLedger, expense_ids_by_report};
use crate::convert::report_from_model;
use crate::entities::{expenses, reports};

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Evaluates `request` for `owner` and creates the report if eligible.
    ///
    /// All reads and writes share one transaction, committed only on success.
    ///
    /// # Errors
    ///
    /// Returns the first failing eligibility rule, or `Storage` on database failure.
    pub async fn create_report(
        &self,
        request: CreateReportRequest,
        owner: UserId,
        today: NaiveDate,
    ) -> Result<CreatedReport, EligibilityError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EligibilityError::Storage(e.to_string()))?;

        let result = {
            let ledger = PgReportLedger::new(&txn);
            ReportEligibilityEngine::new(&ledger)
                .evaluate_and_create(request, owner, today)
                .await
        };

        match result {
            Ok(created) => {
                txn.commit()
                    .await
                    .map_err(|e| EligibilityError::Storage(e.to_string()))?;
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!(error = %rollback, "Rollback after rejected report failed");
                }
                Err(e)
            }
        }
    }

    /// Gets a report with its expenses if it exists and belongs to `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_detail(
        &self,
        id: ReportId,
        owner: UserId,
    ) -> Result<Option<ReportDetail>, DbErr> {
        let Some(report) = reports::Entity::find_by_id(id.into_inner())
            .filter(reports::Column::OwnerId.eq(owner.into_inner()))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let ordered_ids = expense_ids_by_report(&self.db, vec![report.id])
            .await?
            .remove(&report.id)
            .unwrap_or_default();

        let mut by_id: HashMap<Uuid, Expense> = expenses::Entity::find()
            .filter(expenses::Column::Id.is_in(ordered_ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| (e.id, Expense::from(e)))
            .collect();

        let expenses: Vec<Expense> = ordered_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect();

        let report = report_from_model(report, expenses.iter().map(|e| e.id).collect());
        Ok(Some(ReportDetail::new(&report, &expenses)))
    }

    /// Lists `owner`'s reports, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<(Vec<ReportSummary>, u64), DbErr> {
        let query = reports::Entity::find().filter(reports::Column::OwnerId.eq(owner.into_inner()));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(reports::Column::CreatedAt)
            .order_by_desc(reports::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let totals = report_totals(&self.db, rows.iter().map(|r| r.id).collect()).await?;

        let summaries = rows
            .into_iter()
            .map(|row| {
                let (amount, count) = totals.get(&row.id).copied().unwrap_or_default();
                ReportSummary::new(&report_from_model(row, Vec::new()), amount, count)
            })
            .collect();

        Ok((summaries, total))
    }
}

/// Sums expense amounts and counts expenses for each report.
pub(crate) async fn report_totals<C: ConnectionTrait>(
    conn: &C,
    report_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, (Decimal, u64)>, DbErr> {
    if report_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = expense_ids_by_report(conn, report_ids).await?;
    let all_ids: Vec<Uuid> = links.values().flatten().copied().collect();

    let amounts: HashMap<Uuid, Decimal> = expenses::Entity::find()
        .filter(expenses::Column::Id.is_in(all_ids))
        .select_only()
        .column(expenses::Column::Id)
        .column(expenses::Column::Amount)
        .into_tuple::<(Uuid, Decimal)>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    Ok(links
        .into_iter()
        .map(|(report_id, expense_ids)| {
            let total: Decimal = expense_ids.iter().filter_map(|id| amounts.get(id)).sum();
            (report_id, (total.normalize(), expense_ids.len() as u64))
        })
        .collect())
}
