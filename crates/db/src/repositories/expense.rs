//! Expense repository for database operations.

use expensa_core::expense::{CreateExpenseInput, Expense};
use expensa_shared::types::{ExpenseId, PageRequest, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{expenses, sea_orm_active_enums::ExpenseStatus};

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new unmapped expense. `input` must already be validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        input: CreateExpenseInput,
    ) -> Result<Expense, DbErr> {
        let now = chrono::Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            owner_id: Set(owner.into_inner()),
            title: Set(input.title),
            amount: Set(input.amount),
            category: Set(input.category),
            status: Set(ExpenseStatus::Unmapped),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(expense.into())
    }

    /// Gets an expense if it exists and belongs to `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_owned(
        &self,
        id: ExpenseId,
        owner: UserId,
    ) -> Result<Option<Expense>, DbErr> {
        let expense = expenses::Entity::find_by_id(id.into_inner())
            .filter(expenses::Column::OwnerId.eq(owner.into_inner()))
            .one(&self.db)
            .await?;

        Ok(expense.map(Into::into))
    }

    /// Lists `owner`'s expenses, newest first.
    ///
    /// Returns the page and the total number of the owner's expenses.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, u64), DbErr> {
        let query =
            expenses::Entity::find().filter(expenses::Column::OwnerId.eq(owner.into_inner()));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}
