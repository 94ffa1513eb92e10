use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    auth::{AuthService, IssuedToken},
    entities::{
        collection_officer::{self, JOB_ROLE_DRIVER, STATUS_APPROVED, STATUS_REJECTED},
        vehicle_registration,
    },
    errors::ServiceError,
};

/// Payload returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub emp_id: String,
    pub id: i32,
    pub token: String,
    pub password_updated: bool,
    pub first_name_english: String,
    pub last_name_english: String,
    pub image: Option<String>,
}

/// Driver profile with the registered vehicle, if any
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    pub emp_id: String,
    pub first_name_english: String,
    pub last_name_english: String,
    pub phone_code01: String,
    pub phone_number01: String,
    pub nic: String,
    pub email: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub v_type: Option<String>,
    pub v_reg_no: Option<String>,
}

/// Driver sign-in, password change and profile lookup
#[derive(Clone)]
pub struct AccountService {
    db: Arc<DatabaseConnection>,
    auth: Arc<AuthService>,
}

impl AccountService {
    pub fn new(db: Arc<DatabaseConnection>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Checks driver credentials and issues a token
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        emp_id: &str,
        password: &str,
    ) -> Result<(LoginResponse, IssuedToken), ServiceError> {
        let db = &*self.db;
        let officer = collection_officer::Entity::find()
            .filter(collection_officer::Column::EmpId.eq(emp_id))
            .filter(collection_officer::Column::JobRole.eq(JOB_ROLE_DRIVER))
            .one(db)
            .await
            .map_err(|e| {
                error!(emp_id, "Failed to look up driver: {}", e);
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::Unauthorized("User not found".to_string()))?;

        if officer.status == STATUS_REJECTED {
            warn!(emp_id, "login attempt by rejected driver");
            return Err(ServiceError::Unauthorized(
                "This EMP ID is Rejected".to_string(),
            ));
        }
        if officer.status != STATUS_APPROVED {
            return Err(ServiceError::Unauthorized("EMP ID not approved".to_string()));
        }

        if !self.auth.verify_password(password, &officer.password).await? {
            warn!(emp_id, "invalid password");
            return Err(ServiceError::Unauthorized("Invalid password".to_string()));
        }

        let issued = self
            .auth
            .generate_token(&officer.emp_id, officer.id, officer.password_updated)?;

        info!(officer_id = officer.id, "driver logged in");

        Ok((
            LoginResponse {
                emp_id: officer.emp_id,
                id: officer.id,
                token: issued.token.clone(),
                password_updated: officer.password_updated,
                first_name_english: officer.first_name_english,
                last_name_english: officer.last_name_english,
                image: officer.image,
            },
            issued,
        ))
    }

    /// Replaces the password after checking the current one
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        officer_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;
        let officer = collection_officer::Entity::find_by_id(officer_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(officer_id, "Failed to load officer: {}", e);
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Officer not found".to_string()))?;

        if !self
            .auth
            .verify_password(current_password, &officer.password)
            .await?
        {
            return Err(ServiceError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }

        let hashed = self.auth.hash_password(new_password).await?;

        let mut active: collection_officer::ActiveModel = officer.into();
        active.password = Set(hashed);
        active.password_updated = Set(true);
        active.update(db).await.map_err(|e| {
            error!(officer_id, "Failed to store new password: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(officer_id, "password changed");
        Ok(())
    }

    /// Profile of an approved officer
    #[instrument(skip(self))]
    pub async fn profile(&self, emp_id: &str) -> Result<DriverProfile, ServiceError> {
        let db = &*self.db;
        let officer = collection_officer::Entity::find()
            .filter(collection_officer::Column::EmpId.eq(emp_id))
            .filter(collection_officer::Column::Status.eq(STATUS_APPROVED))
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(
                    "User account not found or not approved. Please contact support.".to_string(),
                )
            })?;

        let vehicle = officer
            .find_related(vehicle_registration::Entity)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(DriverProfile {
            emp_id: officer.emp_id,
            first_name_english: officer.first_name_english,
            last_name_english: officer.last_name_english,
            phone_code01: officer.phone_code01.unwrap_or_default(),
            phone_number01: officer.phone_number01.unwrap_or_default(),
            nic: officer.nic.unwrap_or_default(),
            email: officer.email.unwrap_or_default(),
            image: officer.image.unwrap_or_default(),
            created_at: officer.created_at,
            v_type: vehicle.as_ref().map(|v| v.v_type.clone()),
            v_reg_no: vehicle.map(|v| v.v_reg_no),
        })
    }
}
