//! Driver dashboard totals and cash reconciliation with a receiving officer.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    db,
    entities::{collection_officer, driver_order, process_order},
    errors::ServiceError,
    models::{business_day::today_bounds_utc, DriverOrderStatus},
    services::{
        order_status::{dedup_ids, latest_driver_orders, lock_driver},
        orders::load_market_orders,
    },
};

/// Today's counters shown on the driver home screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmountSummary {
    pub total_orders: u64,
    pub total_cash_amount: Decimal,
    pub todo_orders: u64,
    pub completed_orders: u64,
    pub on_the_way_orders: u64,
    pub hold_orders: u64,
    pub return_orders: u64,
    pub return_received_orders: u64,
    pub cash_orders: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedCashOrder {
    pub driver_order_id: i32,
    pub order_id: i32,
    pub inv_no: String,
    pub amount: Decimal,
    pub complete_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedCash {
    pub orders: Vec<ReceivedCashOrder>,
    pub total_amount: Decimal,
    pub order_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandOverResult {
    /// Receiving officer's employee id
    pub emp_id: String,
    pub officer_id: i32,
    pub total_amount: Decimal,
    pub order_count: usize,
}

/// Aggregates a day's driver orders. Orders are counted once per process order.
pub fn summarize_day(
    rows: &[(driver_order::Model, Option<process_order::Model>)],
) -> AmountSummary {
    let mut summary = AmountSummary::default();
    let mut seen = BTreeSet::new();

    for (drv, po) in rows {
        if !seen.insert(drv.order_id) {
            continue;
        }
        summary.total_orders += 1;
        match drv.drv_status {
            DriverOrderStatus::Todo => summary.todo_orders += 1,
            DriverOrderStatus::OnTheWay => summary.on_the_way_orders += 1,
            DriverOrderStatus::Completed => summary.completed_orders += 1,
            DriverOrderStatus::Hold => summary.hold_orders += 1,
            DriverOrderStatus::Return => summary.return_orders += 1,
            DriverOrderStatus::ReturnReceived => summary.return_received_orders += 1,
        }
        if let Some(po) = po.as_ref().filter(|po| po.is_cash()) {
            summary.cash_orders += 1;
            summary.total_cash_amount += po.amount;
        }
    }

    summary
}

#[derive(Clone)]
pub struct CashService {
    db: Arc<DatabaseConnection>,
    offset: FixedOffset,
}

impl CashService {
    pub fn new(db: Arc<DatabaseConnection>, offset: FixedOffset) -> Self {
        Self { db, offset }
    }

    /// Totals for the driver's orders created today and not yet handed over
    #[instrument(skip(self))]
    pub async fn get_amount(
        &self,
        driver_id: i32,
        now: DateTime<Utc>,
    ) -> Result<AmountSummary, ServiceError> {
        let (start, end) = today_bounds_utc(now, self.offset);
        let rows = driver_order::Entity::find()
            .filter(driver_order::Column::DriverId.eq(driver_id))
            .filter(driver_order::Column::IsHandOver.eq(false))
            .filter(driver_order::Column::CreatedAt.gte(start))
            .filter(driver_order::Column::CreatedAt.lt(end))
            .order_by_desc(driver_order::Column::Id)
            .find_also_related(process_order::Entity)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(driver_id, "Failed to load today's orders: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        Ok(summarize_day(&rows))
    }

    /// Completed cash orders still held by the driver
    #[instrument(skip(self))]
    pub async fn get_received_cash(&self, driver_id: i32) -> Result<ReceivedCash, ServiceError> {
        let db = &*self.db;
        let rows = driver_order::Entity::find()
            .filter(driver_order::Column::DriverId.eq(driver_id))
            .filter(driver_order::Column::DrvStatus.eq(DriverOrderStatus::Completed))
            .filter(driver_order::Column::IsHandOver.eq(false))
            .order_by_desc(driver_order::Column::CompleteTime)
            .order_by_desc(driver_order::Column::Id)
            .find_also_related(process_order::Entity)
            .all(db)
            .await
            .map_err(|e| {
                error!(driver_id, "Failed to load received cash: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        let cash: Vec<(driver_order::Model, process_order::Model)> = rows
            .into_iter()
            .filter_map(|(drv, po)| po.filter(|po| po.is_cash()).map(|po| (drv, po)))
            .collect();
        let markets =
            load_market_orders(db, cash.iter().map(|(_, po)| po.order_id).collect()).await?;

        let orders: Vec<ReceivedCashOrder> = cash
            .into_iter()
            .map(|(drv, po)| ReceivedCashOrder {
                driver_order_id: drv.id,
                order_id: po.id,
                amount: markets
                    .get(&po.order_id)
                    .map(|m| m.full_total)
                    .unwrap_or_default(),
                inv_no: po.inv_no,
                complete_time: drv.complete_time,
            })
            .collect();
        let total_amount = orders.iter().map(|o| o.amount).sum();

        Ok(ReceivedCash {
            order_count: orders.len(),
            total_amount,
            orders,
        })
    }

    /// Records the driver's collected cash against a receiving officer
    #[instrument(skip(self))]
    pub async fn hand_over_cash(
        &self,
        driver_id: i32,
        order_ids: Vec<i32>,
        total_amount: Decimal,
        officer_emp_id: &str,
    ) -> Result<HandOverResult, ServiceError> {
        let ids = dedup_ids(&order_ids);
        if ids.is_empty() {
            return Err(ServiceError::BadRequest("No orders selected".to_string()));
        }
        let officer_emp_id = officer_emp_id.trim();
        if officer_emp_id.is_empty() {
            return Err(ServiceError::BadRequest(
                "Officer Employee ID is required".to_string(),
            ));
        }

        let db = &*self.db;
        let driver = collection_officer::Entity::find_by_id(driver_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Driver not found".to_string()))?;
        let officer = collection_officer::Entity::find()
            .filter(collection_officer::Column::EmpId.eq(officer_emp_id))
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .filter(|o| o.is_approved())
            .ok_or_else(|| ServiceError::NotFound("Officer not found in the system".to_string()))?;

        if let (Some(driver_centre), Some(officer_centre)) =
            (driver.distributed_center_id, officer.distributed_center_id)
        {
            if driver_centre != officer_centre {
                warn!(driver_id, officer_id = officer.id, "hand-over across centres");
                return Err(ServiceError::Forbidden(
                    "Officer belongs to a different distribution centre".to_string(),
                ));
            }
        }

        let tx = db::begin(db, "hand_over_cash").await?;
        lock_driver(tx.conn(), driver_id).await?;

        let driver_orders = latest_driver_orders(tx.conn(), driver_id, &ids).await?;
        if driver_orders.len() != ids.len() {
            return Err(ServiceError::Conflict(
                "Some selected orders are not assigned to you".to_string(),
            ));
        }
        if let Some(handed) = driver_orders.iter().find(|d| d.is_hand_over) {
            return Err(ServiceError::Conflict(format!(
                "Order {} has already been handed over",
                handed.order_id
            )));
        }
        if let Some(open) = driver_orders
            .iter()
            .find(|d| d.drv_status != DriverOrderStatus::Completed)
        {
            return Err(ServiceError::Conflict(format!(
                "Order {} is {} and cannot be handed over",
                open.order_id, open.drv_status
            )));
        }

        let process_orders: HashMap<i32, process_order::Model> = process_order::Entity::find()
            .filter(process_order::Column::Id.is_in(ids.clone()))
            .all(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?
            .into_iter()
            .map(|po| (po.id, po))
            .collect();
        if let Some(drv) = driver_orders
            .iter()
            .find(|d| !process_orders.get(&d.order_id).is_some_and(|po| po.is_cash()))
        {
            return Err(ServiceError::Conflict(format!(
                "Order {} is not a cash order",
                drv.order_id
            )));
        }

        let markets = load_market_orders(
            tx.conn(),
            process_orders.values().map(|po| po.order_id).collect(),
        )
        .await?;
        let mut prices = Vec::with_capacity(driver_orders.len());
        for drv in &driver_orders {
            let price = process_orders
                .get(&drv.order_id)
                .and_then(|po| markets.get(&po.order_id))
                .map(|m| m.full_total)
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Order {} not found", drv.order_id))
                })?;
            prices.push((drv.id, price));
        }

        let expected: Decimal = prices.iter().map(|(_, p)| *p).sum();
        if expected.round_dp(2) != total_amount.round_dp(2) {
            return Err(ServiceError::BadRequest(format!(
                "Total amount {} does not match the selected orders ({})",
                total_amount, expected
            )));
        }

        let now = Utc::now();
        for (drv_id, price) in &prices {
            let updated = driver_order::Entity::update_many()
                .col_expr(driver_order::Column::IsHandOver, Expr::value(true))
                .col_expr(driver_order::Column::HandOverOfficer, Expr::value(officer.id))
                .col_expr(driver_order::Column::HandOverPrice, Expr::value(*price))
                .col_expr(driver_order::Column::HandedOverAt, Expr::value(now))
                .filter(driver_order::Column::Id.eq(*drv_id))
                .filter(driver_order::Column::IsHandOver.eq(false))
                .exec(tx.conn())
                .await
                .map_err(|e| {
                    error!(driver_id, drv_order_id = drv_id, "Failed to record hand-over: {}", e);
                    ServiceError::DatabaseError(e)
                })?
                .rows_affected;
            if updated != 1 {
                return Err(ServiceError::Conflict(
                    "Order has already been handed over".to_string(),
                ));
            }
        }

        tx.commit().await?;

        info!(
            driver_id,
            officer_id = officer.id,
            count = prices.len(),
            %expected,
            "cash handed over"
        );

        Ok(HandOverResult {
            emp_id: officer.emp_id,
            officer_id: officer.id,
            total_amount: expected,
            order_count: prices.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn row(
        order_id: i32,
        status: DriverOrderStatus,
        payment: &str,
        amount: Decimal,
    ) -> (driver_order::Model, Option<process_order::Model>) {
        let now = Utc::now();
        (
            driver_order::Model {
                id: order_id * 100,
                driver_id: 1,
                order_id,
                drv_status: status,
                is_hand_over: false,
                hand_over_officer: None,
                hand_over_price: None,
                hand_over_time: now + Duration::hours(24),
                handed_over_at: None,
                signature: None,
                start_time: None,
                complete_time: None,
                created_at: now,
            },
            Some(process_order::Model {
                id: order_id,
                order_id: order_id + 1000,
                inv_no: format!("INV{order_id}"),
                payment_method: payment.to_string(),
                amount,
                is_paid: false,
                status: "Collected".to_string(),
                created_at: now,
            }),
        )
    }

    #[test]
    fn empty_day_is_all_zero() {
        assert_eq!(summarize_day(&[]), AmountSummary::default());
    }

    #[test]
    fn counts_statuses_and_cash() {
        let rows = vec![
            row(1, DriverOrderStatus::Todo, "Cash", dec!(100.50)),
            row(2, DriverOrderStatus::Completed, "Cash", dec!(250.00)),
            row(3, DriverOrderStatus::Hold, "Card", dec!(80.00)),
            row(4, DriverOrderStatus::OnTheWay, "cash", dec!(20.25)),
        ];
        let summary = summarize_day(&rows);
        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.todo_orders, 1);
        assert_eq!(summary.completed_orders, 1);
        assert_eq!(summary.hold_orders, 1);
        assert_eq!(summary.on_the_way_orders, 1);
        assert_eq!(summary.cash_orders, 3);
        assert_eq!(summary.total_cash_amount, dec!(370.75));
    }

    #[test]
    fn reassigned_order_counts_once() {
        let rows = vec![
            row(7, DriverOrderStatus::Todo, "Cash", dec!(10.00)),
            row(7, DriverOrderStatus::ReturnReceived, "Cash", dec!(10.00)),
        ];
        let summary = summarize_day(&rows);
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.todo_orders, 1);
        assert_eq!(summary.total_cash_amount, dec!(10.00));
    }
}
