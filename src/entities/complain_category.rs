use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaincategory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub app_id: i32,
    pub category_english: String,
    pub category_sinhala: Option<String>,
    pub category_tamil: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::system_application::Entity",
        from = "Column::AppId",
        to = "super::system_application::Column::Id"
    )]
    SystemApplication,
    #[sea_orm(has_many = "super::driver_complain::Entity")]
    DriverComplain,
}

impl Related<super::system_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SystemApplication.def()
    }
}

impl Related<super::driver_complain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverComplain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
