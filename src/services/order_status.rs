//! Driver-order status transitions.
//!
//! Every transition writes `driverorders.drv_status` and the matching
//! `processorders.status` in one transaction. Driver-order updates are
//! conditional on the source statuses from [`DriverOrderStatus::allowed_next`],
//! so a concurrent change shows up as a row-count mismatch and rolls back.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    db,
    entities::{collection_officer, driver_order, process_order},
    errors::ServiceError,
    models::DriverOrderStatus,
};

/// Invoice reference echoed back by batch transitions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub id: i32,
    pub inv_no: String,
}

/// Outcome of moving a set of orders to a new status
#[derive(Debug, Clone)]
pub(crate) struct TransitionBatch {
    pub process_orders: Vec<process_order::Model>,
    pub driver_orders: Vec<driver_order::Model>,
    pub process_orders_updated: u64,
    pub driver_orders_updated: u64,
}

impl TransitionBatch {
    pub fn order_refs(&self) -> Vec<OrderRef> {
        self.process_orders
            .iter()
            .map(|po| OrderRef {
                id: po.id,
                inv_no: po.inv_no.clone(),
            })
            .collect()
    }

    pub fn invoice_numbers(&self) -> Vec<String> {
        self.process_orders
            .iter()
            .map(|po| po.inv_no.clone())
            .filter(|inv| !inv.is_empty())
            .collect()
    }

    pub fn order_ids(&self) -> Vec<i32> {
        self.process_orders.iter().map(|po| po.id).collect()
    }

    pub fn driver_order_ids(&self) -> Vec<i32> {
        self.driver_orders.iter().map(|d| d.id).collect()
    }
}

/// Result of a single-order transition
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTransition {
    pub driver_order_id: i32,
    pub order_id: i32,
    pub inv_no: String,
    pub drv_status: DriverOrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<DateTime<Utc>>,
}

/// Result of acknowledging returned parcels at the centre
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceivedResult {
    pub process_orders_updated: u64,
    pub driver_orders_updated: u64,
    pub order_ids: Vec<i32>,
    pub invoice_numbers: Vec<String>,
}

pub(crate) fn already_in_message(status: DriverOrderStatus) -> String {
    match status {
        DriverOrderStatus::Todo => "This order is already in your target list".to_string(),
        DriverOrderStatus::OnTheWay => "This order is already on the way".to_string(),
        DriverOrderStatus::Completed => "This order is already completed".to_string(),
        DriverOrderStatus::Hold => "This order is already on hold".to_string(),
        DriverOrderStatus::Return => "This order has already been returned".to_string(),
        DriverOrderStatus::ReturnReceived => {
            "This order has already been marked as return received".to_string()
        }
    }
}

/// Rejects a batch when any order already sits in `target` (409) or cannot reach it (400)
pub(crate) fn check_transition(
    driver_orders: &[driver_order::Model],
    target: DriverOrderStatus,
) -> Result<(), ServiceError> {
    if driver_orders.iter().any(|d| d.drv_status == target) {
        return Err(ServiceError::Conflict(already_in_message(target)));
    }

    if let Some(blocked) = driver_orders
        .iter()
        .find(|d| !d.drv_status.can_transition_to(target))
    {
        return Err(ServiceError::InvalidStatus(format!(
            "Invalid status: order {} is {} and cannot move to {}",
            blocked.order_id, blocked.drv_status, target
        )));
    }

    Ok(())
}

pub(crate) fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Serializes per-driver writes on Postgres by locking the driver's officer row.
/// SQLite already serializes writers.
pub(crate) async fn lock_driver<C: ConnectionTrait>(
    conn: &C,
    driver_id: i32,
) -> Result<(), ServiceError> {
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }
    collection_officer::Entity::find_by_id(driver_id)
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;
    Ok(())
}

/// Newest driver order per process order, restricted to the driver's own rows
pub(crate) async fn latest_driver_orders<C: ConnectionTrait>(
    conn: &C,
    driver_id: i32,
    order_ids: &[i32],
) -> Result<Vec<driver_order::Model>, ServiceError> {
    let rows = driver_order::Entity::find()
        .filter(driver_order::Column::DriverId.eq(driver_id))
        .filter(driver_order::Column::OrderId.is_in(order_ids.to_vec()))
        .order_by_desc(driver_order::Column::Id)
        .all(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;

    let mut latest: HashMap<i32, driver_order::Model> = HashMap::new();
    for row in rows {
        latest.entry(row.order_id).or_insert(row);
    }

    Ok(order_ids
        .iter()
        .filter_map(|id| latest.remove(id))
        .collect())
}

/// Moves the driver's orders for `order_ids` to `target` on both tables.
///
/// Must run inside a transaction.
pub(crate) async fn transition_batch<C: ConnectionTrait>(
    conn: &C,
    driver_id: i32,
    order_ids: &[i32],
    target: DriverOrderStatus,
) -> Result<TransitionBatch, ServiceError> {
    let ids = dedup_ids(order_ids);

    let process_orders = process_order::Entity::find()
        .filter(process_order::Column::Id.is_in(ids.clone()))
        .order_by_asc(process_order::Column::Id)
        .all(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;
    if process_orders.is_empty() {
        return Err(ServiceError::NotFound(
            "No orders found with the provided IDs".to_string(),
        ));
    }

    let driver_orders = latest_driver_orders(conn, driver_id, &ids).await?;
    if driver_orders.is_empty() {
        return Err(ServiceError::NotFound(
            "No driver orders found for the provided order IDs".to_string(),
        ));
    }
    if driver_orders.len() != ids.len() {
        let owned: BTreeSet<i32> = driver_orders.iter().map(|d| d.order_id).collect();
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !owned.contains(id))
            .map(|id| id.to_string())
            .collect();
        return Err(ServiceError::NotFound(format!(
            "No driver orders found for order IDs: {}",
            missing.join(", ")
        )));
    }

    check_transition(&driver_orders, target)?;

    let driver_order_ids: Vec<i32> = driver_orders.iter().map(|d| d.id).collect();
    let now = Utc::now();

    let mut update = driver_order::Entity::update_many()
        .col_expr(driver_order::Column::DrvStatus, Expr::value(target))
        .filter(driver_order::Column::Id.is_in(driver_order_ids.clone()))
        .filter(driver_order::Column::DrvStatus.is_in(DriverOrderStatus::sources_of(target)));
    match target {
        DriverOrderStatus::OnTheWay => {
            update = update.col_expr(driver_order::Column::StartTime, Expr::value(now));
        }
        DriverOrderStatus::Completed => {
            update = update.col_expr(driver_order::Column::CompleteTime, Expr::value(now));
        }
        _ => {}
    }
    let driver_orders_updated = update
        .exec(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .rows_affected;

    if driver_orders_updated != driver_order_ids.len() as u64 {
        warn!(
            driver_id,
            expected = driver_order_ids.len(),
            updated = driver_orders_updated,
            "driver orders changed concurrently"
        );
        return Err(ServiceError::Conflict(
            "Order status changed concurrently, please retry".to_string(),
        ));
    }

    let touched: Vec<i32> = driver_orders.iter().map(|d| d.order_id).collect();
    let process_orders_updated = process_order::Entity::update_many()
        .col_expr(
            process_order::Column::Status,
            Expr::value(target.process_status().to_string()),
        )
        .filter(process_order::Column::Id.is_in(touched.clone()))
        .exec(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .rows_affected;

    let process_orders = process_orders
        .into_iter()
        .filter(|po| touched.contains(&po.id))
        .collect();

    Ok(TransitionBatch {
        process_orders,
        driver_orders,
        process_orders_updated,
        driver_orders_updated,
    })
}

/// Journey start, delivery completion and return acknowledgement
#[derive(Clone)]
pub struct OrderStatusService {
    db: Arc<DatabaseConnection>,
}

impl OrderStatusService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Todo/Hold -> On the way; a driver may only have one order on the way
    #[instrument(skip(self))]
    pub async fn start_journey(
        &self,
        driver_id: i32,
        order_id: i32,
    ) -> Result<OrderTransition, ServiceError> {
        let tx = db::begin(&self.db, "start_journey").await?;
        lock_driver(tx.conn(), driver_id).await?;

        let on_the_way = driver_order::Entity::find()
            .filter(driver_order::Column::DriverId.eq(driver_id))
            .filter(driver_order::Column::DrvStatus.eq(DriverOrderStatus::OnTheWay))
            .filter(driver_order::Column::OrderId.ne(order_id))
            .one(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?;
        if let Some(active) = on_the_way {
            warn!(driver_id, active_order = active.order_id, "journey already in progress");
            return Err(ServiceError::Conflict(
                "You already have an order on the way. Complete it before starting another."
                    .to_string(),
            ));
        }

        let batch =
            transition_batch(tx.conn(), driver_id, &[order_id], DriverOrderStatus::OnTheWay)
                .await?;
        let result = self.single_result(tx.conn(), &batch).await?;
        tx.commit().await?;

        info!(driver_id, order_id, "journey started");
        Ok(result)
    }

    /// On the way -> Completed; process order Delivered and cash orders marked paid
    #[instrument(skip(self, signature))]
    pub async fn complete_order(
        &self,
        driver_id: i32,
        order_id: i32,
        signature: Option<String>,
    ) -> Result<OrderTransition, ServiceError> {
        let tx = db::begin(&self.db, "complete_order").await?;

        let batch =
            transition_batch(tx.conn(), driver_id, &[order_id], DriverOrderStatus::Completed)
                .await?;

        if let Some(signature) = signature.filter(|s| !s.trim().is_empty()) {
            driver_order::Entity::update_many()
                .col_expr(driver_order::Column::Signature, Expr::value(signature))
                .filter(driver_order::Column::Id.is_in(batch.driver_order_ids()))
                .exec(tx.conn())
                .await
                .map_err(ServiceError::DatabaseError)?;
        }

        let cash_ids: Vec<i32> = batch
            .process_orders
            .iter()
            .filter(|po| po.is_cash())
            .map(|po| po.id)
            .collect();
        if !cash_ids.is_empty() {
            process_order::Entity::update_many()
                .col_expr(process_order::Column::IsPaid, Expr::value(true))
                .filter(process_order::Column::Id.is_in(cash_ids))
                .exec(tx.conn())
                .await
                .map_err(|e| {
                    error!(order_id, "Failed to mark cash order paid: {}", e);
                    ServiceError::DatabaseError(e)
                })?;
        }

        let result = self.single_result(tx.conn(), &batch).await?;
        tx.commit().await?;

        info!(driver_id, order_id, "order completed");
        Ok(result)
    }

    /// Return -> Return Received for parcels back at the centre
    #[instrument(skip(self))]
    pub async fn update_return_received(
        &self,
        driver_id: i32,
        order_ids: Vec<i32>,
    ) -> Result<ReturnReceivedResult, ServiceError> {
        let tx = db::begin(&self.db, "update_return_received").await?;
        let batch = transition_batch(
            tx.conn(),
            driver_id,
            &order_ids,
            DriverOrderStatus::ReturnReceived,
        )
        .await?;
        tx.commit().await?;

        info!(driver_id, count = batch.driver_orders_updated, "returns received");
        Ok(ReturnReceivedResult {
            process_orders_updated: batch.process_orders_updated,
            driver_orders_updated: batch.driver_orders_updated,
            order_ids: batch.order_ids(),
            invoice_numbers: batch.invoice_numbers(),
        })
    }

    async fn single_result<C: ConnectionTrait>(
        &self,
        conn: &C,
        batch: &TransitionBatch,
    ) -> Result<OrderTransition, ServiceError> {
        let before = batch
            .driver_orders
            .first()
            .ok_or_else(|| ServiceError::InternalError("empty transition batch".to_string()))?;
        let updated = driver_order::Entity::find_by_id(before.id)
            .one(conn)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Driver order not found".to_string()))?;
        let inv_no = batch
            .process_orders
            .first()
            .map(|po| po.inv_no.clone())
            .unwrap_or_default();

        Ok(OrderTransition {
            driver_order_id: updated.id,
            order_id: updated.order_id,
            inv_no,
            drv_status: updated.drv_status,
            start_time: updated.start_time,
            complete_time: updated.complete_time,
        })
    }
}
