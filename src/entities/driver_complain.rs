use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_OPENED: &str = "Opened";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drivercomplains")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub driver_id: i32,
    pub complain_category: i32,
    #[sea_orm(unique)]
    pub ref_no: String,
    #[sea_orm(column_type = "Text")]
    pub complain: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reply: Option<String>,
    pub status: String,
    pub admin_reply_by: Option<i32>,
    pub reply_time: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::collection_officer::Entity",
        from = "Column::DriverId",
        to = "super::collection_officer::Column::Id"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::complain_category::Entity",
        from = "Column::ComplainCategory",
        to = "super::complain_category::Column::Id"
    )]
    Category,
}

impl Related<super::collection_officer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl Related<super::complain_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
