use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicleregistration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub co_id: i32,
    pub v_type: String,
    pub v_reg_no: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::collection_officer::Entity",
        from = "Column::CoId",
        to = "super::collection_officer::Column::Id"
    )]
    CollectionOfficer,
}

impl Related<super::collection_officer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectionOfficer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
