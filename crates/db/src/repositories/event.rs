//! Event repository.

use std::collections::HashMap;

use expensa_core::event::Event;
use expensa_shared::types::{PageRequest, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::convert::event_from_model;
use crate::entities::{event_staff, events};

/// Event repository.
#[derive(Debug, Clone)]
pub struct EventRepository {
    db: DatabaseConnection,
}

impl EventRepository {
    /// Creates a new event repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an event and rosters `event.staff` onto it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, event: Event) -> Result<Event, DbErr> {
        let txn = self.db.begin().await?;

        events::ActiveModel {
            id: Set(event.id.into_inner()),
            event_name: Set(event.event_name.clone()),
            start_date: Set(event.start_date),
            end_date: Set(event.end_date),
            start_time: Set(event.start_time),
            end_time: Set(event.end_time),
            description: Set(event.description.clone()),
            location: Set(event.location.clone()),
            status: Set(event.status.clone()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        if !event.staff.is_empty() {
            let roster = event.staff.iter().map(|user| event_staff::ActiveModel {
                event_id: Set(event.id.into_inner()),
                user_id: Set(user.into_inner()),
            });
            event_staff::Entity::insert_many(roster).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(event)
    }

    /// Lists events `user` is rostered onto, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_staff(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<(Vec<Event>, u64), DbErr> {
        let event_ids: Vec<Uuid> = event_staff::Entity::find()
            .filter(event_staff::Column::UserId.eq(user.into_inner()))
            .select_only()
            .column(event_staff::Column::EventId)
            .into_tuple()
            .all(&self.db)
            .await?;

        if event_ids.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let query = events::Entity::find().filter(events::Column::Id.is_in(event_ids));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(events::Column::StartDate)
            .order_by_asc(events::Column::StartTime)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let page_ids: Vec<Uuid> = rows.iter().map(|e| e.id).collect();
        let mut staff: HashMap<Uuid, Vec<UserId>> = HashMap::new();
        for link in event_staff::Entity::find()
            .filter(event_staff::Column::EventId.is_in(page_ids))
            .all(&self.db)
            .await?
        {
            staff.entry(link.event_id).or_default().push(link.user_id.into());
        }

        let events = rows
            .into_iter()
            .map(|row| {
                let roster = staff.remove(&row.id).unwrap_or_default();
                event_from_model(row, roster)
            })
            .collect();

        Ok((events, total))
    }
}
