use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const JOB_ROLE_DRIVER: &str = "Driver";

pub const STATUS_APPROVED: &str = "Approved";
pub const STATUS_NOT_APPROVED: &str = "Not Approved";
pub const STATUS_REJECTED: &str = "Rejected";

/// Field staff record; drivers and the officers who receive their cash both live here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collectionofficer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub emp_id: String,
    pub first_name_english: String,
    pub last_name_english: String,
    pub first_name_sinhala: Option<String>,
    pub last_name_sinhala: Option<String>,
    pub first_name_tamil: Option<String>,
    pub last_name_tamil: Option<String>,
    pub phone_code01: Option<String>,
    pub phone_number01: Option<String>,
    pub nic: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub job_role: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub password_updated: bool,
    pub distributed_center_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name_english, self.last_name_english)
            .trim()
            .to_string()
    }

    pub fn is_approved(&self) -> bool {
        self.status == STATUS_APPROVED
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vehicle_registration::Entity")]
    VehicleRegistration,
    #[sea_orm(has_many = "super::driver_order::Entity")]
    DriverOrder,
    #[sea_orm(has_many = "super::driver_complain::Entity")]
    DriverComplain,
}

impl Related<super::vehicle_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleRegistration.def()
    }
}

impl Related<super::driver_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverOrder.def()
    }
}

impl Related<super::driver_complain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverComplain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
