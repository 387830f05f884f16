//! `SeaORM` Entity for events table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub event_name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_staff::Entity")]
    EventStaff,
}

impl Related<super::event_staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventStaff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
