use crate::models::DriverOrderStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One delivery leg owned by one driver.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "driverorders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub driver_id: i32,
    /// Process order id
    pub order_id: i32,
    pub drv_status: DriverOrderStatus,
    pub is_hand_over: bool,
    /// Officer who received the cash
    pub hand_over_officer: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub hand_over_price: Option<Decimal>,
    /// Deadline for handing the order over
    pub hand_over_time: DateTimeUtc,
    pub handed_over_at: Option<DateTimeUtc>,
    pub signature: Option<String>,
    pub start_time: Option<DateTimeUtc>,
    pub complete_time: Option<DateTimeUtc>,
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
        belongs_to = "super::process_order::Entity",
        from = "Column::OrderId",
        to = "super::process_order::Column::Id"
    )]
    ProcessOrder,
    #[sea_orm(has_many = "super::driver_hold_order::Entity")]
    DriverHoldOrder,
    #[sea_orm(has_many = "super::driver_return_order::Entity")]
    DriverReturnOrder,
}

impl Related<super::collection_officer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl Related<super::process_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessOrder.def()
    }
}

impl Related<super::driver_hold_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverHoldOrder.def()
    }
}

impl Related<super::driver_return_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverReturnOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
