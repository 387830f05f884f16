//! Tier repository for tier and category caps.

use expensa_core::tier::Tier;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::convert::tier_from_models;
use crate::entities::{sea_orm_active_enums::CategoryStatus, tier_categories, tiers};

/// Input for one category cap.
#[derive(Debug, Clone)]
pub struct CreateTierCategoryInput {
    /// Category title.
    pub title: String,
    /// Cap per report.
    pub max_amount: Decimal,
    /// Enabled or disabled.
    pub status: CategoryStatus,
}

/// Input for creating a tier.
#[derive(Debug, Clone)]
pub struct CreateTierInput {
    /// Unique name.
    pub name: String,
    /// Rolling-window ceiling.
    pub total_amount: Decimal,
    /// Category caps.
    pub categories: Vec<CreateTierCategoryInput>,
}

/// Tier repository.
#[derive(Debug, Clone)]
pub struct TierRepository {
    db: DatabaseConnection,
}

impl TierRepository {
    /// Creates a new tier repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a tier and its categories atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the database operation fails.
    pub async fn create(&self, input: CreateTierInput) -> Result<Tier, DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let tier = tiers::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            total_amount: Set(input.total_amount),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut categories = Vec::with_capacity(input.categories.len());
        for category in input.categories {
            let row = tier_categories::ActiveModel {
                id: Set(Uuid::now_v7()),
                tier_id: Set(tier.id),
                title: Set(category.title),
                max_amount: Set(category.max_amount),
                status: Set(category.status),
            }
            .insert(&txn)
            .await?;
            categories.push(row);
        }

        txn.commit().await?;
        Ok(tier_from_models(tier, categories))
    }

    /// Gets a tier with its categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tier>, DbErr> {
        let Some(tier) = tiers::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let categories = tier_categories::Entity::find()
            .filter(tier_categories::Column::TierId.eq(id))
            .order_by_asc(tier_categories::Column::Title)
            .all(&self.db)
            .await?;

        Ok(Some(tier_from_models(tier, categories)))
    }
}
