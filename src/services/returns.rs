use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{
    db,
    entities::{driver_order, driver_return_order, process_order, return_reason},
    errors::ServiceError,
    models::DriverOrderStatus,
    services::{
        holds::Reason,
        order_status::{lock_driver, transition_batch, OrderRef},
        orders::load_market_orders,
    },
};

impl From<return_reason::Model> for Reason {
    fn from(m: return_reason::Model) -> Self {
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
pub struct ReturnSubmitResult {
    pub process_orders_updated: u64,
    pub driver_orders_updated: u64,
    pub return_orders_inserted: u64,
    pub order_ids: Vec<i32>,
    pub driver_order_ids: Vec<i32>,
    pub invoice_numbers: Vec<String>,
    pub order_details: Vec<OrderRef>,
}

/// A returned order waiting to be received at the centre
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverReturnOrder {
    pub driver_order_id: i32,
    pub order_id: i32,
    pub inv_no: String,
    pub drv_status: DriverOrderStatus,
    pub full_total: Option<Decimal>,
    pub full_name: Option<String>,
    pub phone_code1: Option<String>,
    pub phone1: Option<String>,
    pub address: Option<String>,
    pub return_reason_id: Option<i32>,
    pub rsn_english: Option<String>,
    pub rsn_sinhala: Option<String>,
    pub rsn_tamil: Option<String>,
    pub note: Option<String>,
    pub returned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ReturnService {
    db: Arc<DatabaseConnection>,
}

impl ReturnService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_reasons(&self) -> Result<Vec<Reason>, ServiceError> {
        let reasons = return_reason::Entity::find()
            .order_by_asc(return_reason::Column::IndexNo)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!("Failed to load return reasons: {}", e);
                ServiceError::DatabaseError(e)
            })?;
        Ok(reasons.into_iter().map(Reason::from).collect())
    }

    /// Marks the driver's orders as returned and records the reason per driver order
    #[instrument(skip(self, note))]
    pub async fn submit_return(
        &self,
        driver_id: i32,
        order_ids: Vec<i32>,
        return_reason_id: i32,
        note: Option<String>,
    ) -> Result<ReturnSubmitResult, ServiceError> {
        let tx = db::begin(&self.db, "submit_return").await?;
        lock_driver(tx.conn(), driver_id).await?;

        return_reason::Entity::find_by_id(return_reason_id)
            .one(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Return reason not found".to_string()))?;

        let batch =
            transition_batch(tx.conn(), driver_id, &order_ids, DriverOrderStatus::Return).await?;

        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let now = Utc::now();
        let rows: Vec<driver_return_order::ActiveModel> = batch
            .driver_orders
            .iter()
            .map(|d| driver_return_order::ActiveModel {
                drv_order_id: Set(d.id),
                return_reason_id: Set(return_reason_id),
                note: Set(note.clone()),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();
        let return_orders_inserted = rows.len() as u64;
        driver_return_order::Entity::insert_many(rows)
            .exec(tx.conn())
            .await
            .map_err(|e| {
                error!(driver_id, "Failed to insert return orders: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        tx.commit().await?;

        info!(
            driver_id,
            count = batch.driver_orders_updated,
            return_reason_id,
            "orders returned"
        );

        Ok(ReturnSubmitResult {
            process_orders_updated: batch.process_orders_updated,
            driver_orders_updated: batch.driver_orders_updated,
            return_orders_inserted,
            order_ids: batch.order_ids(),
            driver_order_ids: batch.driver_order_ids(),
            invoice_numbers: batch.invoice_numbers(),
            order_details: batch.order_refs(),
        })
    }

    /// The driver's orders in Return, newest first, with the latest return reason
    #[instrument(skip(self))]
    pub async fn list_driver_return_orders(
        &self,
        driver_id: i32,
    ) -> Result<Vec<DriverReturnOrder>, ServiceError> {
        let db = &*self.db;
        let rows = driver_order::Entity::find()
            .filter(driver_order::Column::DriverId.eq(driver_id))
            .filter(driver_order::Column::DrvStatus.eq(DriverOrderStatus::Return))
            .order_by_desc(driver_order::Column::CreatedAt)
            .order_by_desc(driver_order::Column::Id)
            .find_also_related(process_order::Entity)
            .all(db)
            .await
            .map_err(|e| {
                error!(driver_id, "Failed to list return orders: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        let drv_ids: Vec<i32> = rows.iter().map(|(d, _)| d.id).collect();
        let mut latest_reason: HashMap<i32, (driver_return_order::Model, Option<return_reason::Model>)> =
            HashMap::new();
        if !drv_ids.is_empty() {
            let returns = driver_return_order::Entity::find()
                .filter(driver_return_order::Column::DrvOrderId.is_in(drv_ids))
                .order_by_desc(driver_return_order::Column::Id)
                .find_also_related(return_reason::Entity)
                .all(db)
                .await
                .map_err(ServiceError::DatabaseError)?;
            for (entry, reason) in returns {
                latest_reason
                    .entry(entry.drv_order_id)
                    .or_insert((entry, reason));
            }
        }

        let market_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, po)| po.as_ref().map(|po| po.order_id))
            .collect();
        let markets = load_market_orders(db, market_ids).await?;

        Ok(rows
            .into_iter()
            .map(|(drv, po)| {
                let market = po.as_ref().and_then(|po| markets.get(&po.order_id));
                let (entry, reason) = match latest_reason.remove(&drv.id) {
                    Some((entry, reason)) => (Some(entry), reason),
                    None => (None, None),
                };
                DriverReturnOrder {
                    driver_order_id: drv.id,
                    order_id: drv.order_id,
                    inv_no: po.map(|po| po.inv_no).unwrap_or_default(),
                    drv_status: drv.drv_status,
                    full_total: market.map(|m| m.full_total),
                    full_name: market.and_then(|m| m.full_name.clone()),
                    phone_code1: market.and_then(|m| m.phone_code1.clone()),
                    phone1: market.and_then(|m| m.phone1.clone()),
                    address: market.map(|m| m.address_line()),
                    return_reason_id: entry.as_ref().map(|e| e.return_reason_id),
                    rsn_english: reason.as_ref().map(|r| r.rsn_english.clone()),
                    rsn_sinhala: reason.as_ref().map(|r| r.rsn_sinhala.clone()),
                    rsn_tamil: reason.map(|r| r.rsn_tamil),
                    note: entry.as_ref().and_then(|e| e.note.clone()),
                    returned_at: entry.map(|e| e.created_at),
                    created_at: drv.created_at,
                }
            })
            .collect())
    }
}
