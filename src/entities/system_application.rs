use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client application registry; complaint categories are scoped per application.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "systemapplications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub app_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::complain_category::Entity")]
    ComplainCategory,
}

impl Related<super::complain_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComplainCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
