use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{
    db,
    entities::{driver_hold_order, hold_reason},
    errors::ServiceError,
    models::DriverOrderStatus,
    services::order_status::{lock_driver, transition_batch, OrderRef},
};

/// Localized reason text shared by the hold and return lookups
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    pub id: i32,
    pub index_no: i32,
    pub rsn_english: String,
    pub rsn_sinhala: String,
    pub rsn_tamil: String,
    pub created_at: DateTime<Utc>,
}

impl From<hold_reason::Model> for Reason {
    fn from(m: hold_reason::Model) -> Self {
        Self {
            id: m.id,
            index_no: m.index_no,
            rsn_english: m.rsn_english,
            rsn_sinhala: m.rsn_sinhala,
            rsn_tamil: m.rsn_tamil,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldSubmitResult {
    pub process_orders_updated: u64,
    pub driver_orders_updated: u64,
    pub hold_orders_inserted: u64,
    pub order_ids: Vec<i32>,
    pub driver_order_ids: Vec<i32>,
    pub invoice_numbers: Vec<String>,
    pub order_details: Vec<OrderRef>,
}

#[derive(Clone)]
pub struct HoldService {
    db: Arc<DatabaseConnection>,
}

impl HoldService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_reasons(&self) -> Result<Vec<Reason>, ServiceError> {
        let reasons = hold_reason::Entity::find()
            .order_by_asc(hold_reason::Column::IndexNo)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!("Failed to load hold reasons: {}", e);
                ServiceError::DatabaseError(e)
            })?;
        Ok(reasons.into_iter().map(Reason::from).collect())
    }

    /// Puts the driver's orders on hold and records the reason per driver order
    #[instrument(skip(self, note))]
    pub async fn submit_hold(
        &self,
        driver_id: i32,
        order_ids: Vec<i32>,
        hold_reason_id: i32,
        note: Option<String>,
    ) -> Result<HoldSubmitResult, ServiceError> {
        let tx = db::begin(&self.db, "submit_hold").await?;
        lock_driver(tx.conn(), driver_id).await?;

        hold_reason::Entity::find_by_id(hold_reason_id)
            .one(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Hold reason not found".to_string()))?;

        let batch =
            transition_batch(tx.conn(), driver_id, &order_ids, DriverOrderStatus::Hold).await?;

        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let now = Utc::now();
        let rows: Vec<driver_hold_order::ActiveModel> = batch
            .driver_orders
            .iter()
            .map(|d| driver_hold_order::ActiveModel {
                drv_order_id: sea_orm::Set(d.id),
                hold_reason_id: sea_orm::Set(hold_reason_id),
                note: sea_orm::Set(note.clone()),
                created_at: sea_orm::Set(now),
                ..Default::default()
            })
            .collect();
        let hold_orders_inserted = rows.len() as u64;
        driver_hold_order::Entity::insert_many(rows)
            .exec(tx.conn())
            .await
            .map_err(|e| {
                error!(driver_id, "Failed to insert hold orders: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        tx.commit().await?;

        info!(
            driver_id,
            count = batch.driver_orders_updated,
            hold_reason_id,
            "orders put on hold"
        );

        Ok(HoldSubmitResult {
            process_orders_updated: batch.process_orders_updated,
            driver_orders_updated: batch.driver_orders_updated,
            hold_orders_inserted,
            order_ids: batch.order_ids(),
            driver_order_ids: batch.driver_order_ids(),
            invoice_numbers: batch.invoice_numbers(),
            order_details: batch.order_refs(),
        })
    }
}
