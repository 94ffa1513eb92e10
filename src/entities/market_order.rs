use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer order as placed in the market place; the source of the delivery address
/// and of `full_total`, the amount a driver collects.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: Option<String>,
    pub full_name: Option<String>,
    pub phone_code1: Option<String>,
    pub phone1: Option<String>,
    pub phone_code2: Option<String>,
    pub phone2: Option<String>,
    pub building_type: Option<String>,
    pub house_no: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub full_total: Decimal,
    pub delivery_type: Option<String>,
    pub schedule_date: Option<Date>,
    pub schedule_time: Option<String>,
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Single line delivery address, skipping blank parts
    pub fn address_line(&self) -> String {
        [&self.house_no, &self.street_name, &self.city]
            .iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::process_order::Entity")]
    ProcessOrder,
}

impl Related<super::process_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
