//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserType, users};

/// Input for provisioning a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Mobile number, unique.
    pub mobile: String,
    /// Display name.
    pub full_name: String,
    /// Assigned tier.
    pub tier_id: Option<Uuid>,
    /// Account kind.
    pub user_type: UserType,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by mobile number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_mobile(&self, mobile: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Mobile.eq(mobile))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Provisions a new, unverified user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::now_v7()),
            mobile: Set(input.mobile),
            full_name: Set(input.full_name),
            tier_id: Set(input.tier_id),
            user_type: Set(input.user_type),
            otp: Set(None),
            mpin_hash: Set(None),
            is_verified: Set(false),
            is_active: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Stores a freshly issued OTP, replacing any outstanding one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn store_otp(&self, user: users::Model, otp: String) -> Result<users::Model, DbErr> {
        let mut active: users::ActiveModel = user.into();
        active.otp = Set(Some(otp));
        active.update(&self.db).await
    }

    /// Consumes the OTP and marks the user verified and active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_verified(&self, user: users::Model) -> Result<users::Model, DbErr> {
        let mut active: users::ActiveModel = user.into();
        active.otp = Set(None);
        active.is_verified = Set(true);
        active.is_active = Set(true);
        active.update(&self.db).await
    }

    /// Stores a new MPIN hash. The outstanding OTP, if any, is consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_mpin_hash(
        &self,
        user: users::Model,
        mpin_hash: String,
    ) -> Result<users::Model, DbErr> {
        let mut active: users::ActiveModel = user.into();
        active.mpin_hash = Set(Some(mpin_hash));
        active.otp = Set(None);
        active.update(&self.db).await
    }
}
