use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const PAYMENT_METHOD_CASH: &str = "Cash";

/// Commerce-side order record; owns the invoice number and the payment data.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "processorders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    #[sea_orm(unique)]
    pub inv_no: String,
    pub payment_method: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub is_paid: bool,
    pub status: String,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn is_cash(&self) -> bool {
        self.payment_method.eq_ignore_ascii_case(PAYMENT_METHOD_CASH)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::market_order::Entity",
        from = "Column::OrderId",
        to = "super::market_order::Column::Id"
    )]
    MarketOrder,
    #[sea_orm(has_many = "super::driver_order::Entity")]
    DriverOrder,
}

impl Related<super::market_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MarketOrder.def()
    }
}

impl Related<super::driver_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
