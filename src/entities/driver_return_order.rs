use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit row written when a driver returns an order to the centre.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "driverreturnorders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub drv_order_id: i32,
    pub return_reason_id: i32,
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
        belongs_to = "super::return_reason::Entity",
        from = "Column::ReturnReasonId",
        to = "super::return_reason::Column::Id"
    )]
    ReturnReason,
}

impl Related<super::driver_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverOrder.def()
    }
}

impl Related<super::return_reason::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReturnReason.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
