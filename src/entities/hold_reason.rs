use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference list of reasons a driver may put a delivery on hold.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "holdreason")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub index_no: i32,
    pub rsn_english: String,
    pub rsn_sinhala: String,
    pub rsn_tamil: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::driver_hold_order::Entity")]
    DriverHoldOrder,
}

impl Related<super::driver_hold_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverHoldOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
