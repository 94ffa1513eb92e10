use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{
    db,
    entities::{collection_officer, complain_category, driver_complain, system_application},
    errors::ServiceError,
    models::business_day::local_date,
    services::order_status::lock_driver,
};

/// Reference number `{empId}{YYMMDD}{seq:03}`
pub fn complaint_ref_no(emp_id: &str, date: NaiveDate, seq: u64) -> String {
    format!("{}{:03}", ref_prefix(emp_id, date), seq)
}

fn ref_prefix(emp_id: &str, date: NaiveDate) -> String {
    format!("{}{}", emp_id, date.format("%y%m%d"))
}

/// One past the highest numeric suffix under `prefix`; gaps from deleted rows are not reused
pub fn next_ref_seq(prefix: &str, ref_nos: &[String]) -> u64 {
    ref_nos
        .iter()
        .filter_map(|r| r.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .map_or(1, |highest| highest + 1)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintCreated {
    pub ref_no: String,
    pub complain_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplainCategory {
    pub id: i32,
    pub category_english: String,
    pub category_sinhala: Option<String>,
    pub category_tamil: Option<String>,
}

impl From<complain_category::Model> for ComplainCategory {
    fn from(m: complain_category::Model) -> Self {
        Self {
            id: m.id,
            category_english: m.category_english,
            category_sinhala: m.category_sinhala,
            category_tamil: m.category_tamil,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverComplaint {
    pub id: i32,
    pub ref_no: String,
    pub complain: String,
    pub reply: Option<String>,
    pub status: String,
    pub complain_category: i32,
    pub category_english: Option<String>,
    pub category_sinhala: Option<String>,
    pub category_tamil: Option<String>,
    pub reply_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ComplaintService {
    db: Arc<DatabaseConnection>,
    offset: FixedOffset,
    app_name: String,
}

impl ComplaintService {
    pub fn new(db: Arc<DatabaseConnection>, offset: FixedOffset, app_name: String) -> Self {
        Self {
            db,
            offset,
            app_name,
        }
    }

    /// Files a complaint under the next reference number of the day
    #[instrument(skip(self, complain))]
    pub async fn add_complain(
        &self,
        driver_id: i32,
        complain_category: i32,
        complain: &str,
    ) -> Result<ComplaintCreated, ServiceError> {
        let complain = complain.trim();
        if complain.is_empty() {
            return Err(ServiceError::ValidationError(
                "Complaint text is required".to_string(),
            ));
        }

        let tx = db::begin(&self.db, "add_complain").await?;
        lock_driver(tx.conn(), driver_id).await?;

        let officer = collection_officer::Entity::find_by_id(driver_id)
            .one(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Officer not found".to_string()))?;

        complain_category::Entity::find_by_id(complain_category)
            .one(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Complaint category not found".to_string()))?;

        let now = Utc::now();
        let today = local_date(now, self.offset);
        let prefix = ref_prefix(&officer.emp_id, today);
        let existing: Vec<String> = driver_complain::Entity::find()
            .select_only()
            .column(driver_complain::Column::RefNo)
            .filter(driver_complain::Column::RefNo.starts_with(&prefix))
            .into_tuple()
            .all(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?;
        let ref_no = complaint_ref_no(&officer.emp_id, today, next_ref_seq(&prefix, &existing));

        let saved = driver_complain::ActiveModel {
            driver_id: Set(driver_id),
            complain_category: Set(complain_category),
            ref_no: Set(ref_no.clone()),
            complain: Set(complain.to_string()),
            status: Set(driver_complain::STATUS_OPENED.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(tx.conn())
        .await
        .map_err(|e| {
            error!(driver_id, "Failed to save complaint: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        tx.commit().await?;

        info!(driver_id, ref_no = %saved.ref_no, "complaint submitted");
        Ok(ComplaintCreated {
            ref_no,
            complain_id: saved.id,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_complain_categories(&self) -> Result<Vec<ComplainCategory>, ServiceError> {
        let db = &*self.db;
        let app = system_application::Entity::find()
            .filter(system_application::Column::AppName.eq(self.app_name.as_str()))
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("{} application not found", self.app_name))
            })?;

        let categories = complain_category::Entity::find()
            .filter(complain_category::Column::AppId.eq(app.id))
            .order_by_asc(complain_category::Column::CategoryEnglish)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to load complaint categories: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        Ok(categories.into_iter().map(ComplainCategory::from).collect())
    }

    /// The driver's complaints, newest first
    #[instrument(skip(self))]
    pub async fn get_my_complains(
        &self,
        driver_id: i32,
    ) -> Result<Vec<DriverComplaint>, ServiceError> {
        let rows = driver_complain::Entity::find()
            .filter(driver_complain::Column::DriverId.eq(driver_id))
            .order_by_desc(driver_complain::Column::CreatedAt)
            .order_by_desc(driver_complain::Column::Id)
            .find_also_related(complain_category::Entity)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(driver_id, "Failed to load complaints: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(c, category)| DriverComplaint {
                id: c.id,
                ref_no: c.ref_no,
                complain: c.complain,
                reply: c.reply,
                status: c.status,
                complain_category: c.complain_category,
                category_english: category.as_ref().map(|k| k.category_english.clone()),
                category_sinhala: category.as_ref().and_then(|k| k.category_sinhala.clone()),
                category_tamil: category.and_then(|k| k.category_tamil),
                reply_time: c.reply_time,
                created_at: c.created_at,
            })
            .collect())
    }
}
