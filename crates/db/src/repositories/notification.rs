//! Notification repository.

use expensa_core::listing::NotificationSummary;
use expensa_core::report::Notification;
use expensa_shared::types::{PageRequest, UserId};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use super::report::report_totals;
use crate::entities::{notifications, reports};

/// Notification repository.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists `owner`'s notifications, newest first, with figures from each report.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<(Vec<NotificationSummary>, u64), DbErr> {
        let query = notifications::Entity::find()
            .filter(notifications::Column::OwnerId.eq(owner.into_inner()));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let report_ids: Vec<Uuid> = rows.iter().map(|n| n.report_id).collect();
        let titles: std::collections::HashMap<Uuid, String> = reports::Entity::find()
            .filter(reports::Column::Id.is_in(report_ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|r| (r.id, r.title))
            .collect();
        let totals = report_totals(&self.db, report_ids).await?;

        let summaries = rows
            .into_iter()
            .map(|row| {
                let title = titles.get(&row.report_id).cloned().unwrap_or_default();
                let (amount, count) = totals.get(&row.report_id).copied().unwrap_or_default();
                NotificationSummary::new(&Notification::from(row), title, amount, count)
            })
            .collect();

        Ok((summaries, total))
    }
}
