//! Order entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum AuditStatus {
    #[sea_orm(num_value = 0)]
    Pending,
    #[sea_orm(num_value = 1)]
    Approved,
    #[sea_orm(num_value = 2)]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub scenic_id: i32,

    pub username: String,

    pub quantity: i32,

    pub audit: AuditStatus,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scenic::Entity",
        from = "Column::ScenicId",
        to = "super::scenic::Column::Id"
    )]
    Scenic,
}

impl Related<super::scenic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
