use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit row written each time a driver holds an order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "driverholdorders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub drv_order_id: i32,
    pub hold_reason_id: i32,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::driver_order::Entity",
        from = "Column::DrvOrderId",
        to = "super::driver_order::Column::Id"
    )]
    DriverOrder,
    #[sea_orm(
        belongs_to = "super::hold_reason::Entity",
        from = "Column::HoldReasonId",
        to = "super::hold_reason::Column::Id"
    )]
    HoldReason,
}

impl Related<super::driver_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverOrder.def()
    }
}

impl Related<super::hold_reason::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HoldReason.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
