use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    db,
    entities::{collection_officer, driver_order, market_order, process_order},
    errors::ServiceError,
    models::{DriverOrderStatus, ProcessOrderStatus},
};

/// Confirmation of a new assignment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignedOrder {
    pub driver_order_id: i32,
    pub order_id: i32,
    pub inv_no: String,
    pub hand_over_time: DateTime<Utc>,
    pub driver_emp_id: String,
    pub assigned_at: DateTime<Utc>,
}

/// One row of the driver's order list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverOrderSummary {
    pub driver_order_id: i32,
    pub order_id: i32,
    pub inv_no: String,
    pub drv_status: DriverOrderStatus,
    pub is_hand_over: bool,
    pub hand_over_time: DateTime<Utc>,
    pub payment_method: String,
    pub is_paid: bool,
    pub amount: Decimal,
    pub full_total: Decimal,
    pub title: Option<String>,
    pub full_name: Option<String>,
    pub phone_code1: Option<String>,
    pub phone1: Option<String>,
    pub address: String,
    pub delivery_type: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub schedule_time: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub complete_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverOrderList {
    pub orders: Vec<DriverOrderSummary>,
    pub total_orders: usize,
}

/// Customer and delivery details of an assigned order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderUserDetails {
    pub order_id: i32,
    pub driver_order_id: i32,
    pub inv_no: String,
    pub drv_status: DriverOrderStatus,
    pub title: Option<String>,
    pub full_name: Option<String>,
    pub phone_code1: Option<String>,
    pub phone1: Option<String>,
    pub phone_code2: Option<String>,
    pub phone2: Option<String>,
    pub building_type: Option<String>,
    pub house_no: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub address: String,
    pub delivery_type: Option<String>,
    pub schedule_date: Option<NaiveDate>,
    pub schedule_time: Option<String>,
    pub payment_method: String,
    pub is_paid: bool,
    pub full_total: Decimal,
}

/// Filters for the driver's order list
#[derive(Debug, Clone, Default)]
pub struct DriverOrderFilter {
    pub statuses: Vec<DriverOrderStatus>,
    pub is_hand_over: bool,
}

/// Invoice-scan assignment and the driver's order views
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    hand_over_window: Duration,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, hand_over_window: Duration) -> Self {
        Self {
            db,
            hand_over_window,
        }
    }

    /// Puts the order behind `inv_no` on the driver's target list
    #[instrument(skip(self))]
    pub async fn assign_driver_order(
        &self,
        driver_id: i32,
        inv_no: &str,
    ) -> Result<AssignedOrder, ServiceError> {
        let inv_no = inv_no.trim();
        if inv_no.is_empty() {
            return Err(ServiceError::ValidationError(
                "Invoice number is required".to_string(),
            ));
        }

        let driver = collection_officer::Entity::find_by_id(driver_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Driver not found".to_string()))?;

        let tx = db::begin(&self.db, "assign_driver_order").await?;

        let mut query =
            process_order::Entity::find().filter(process_order::Column::InvNo.eq(inv_no));
        if tx.conn().get_database_backend() == DatabaseBackend::Postgres {
            query = query.lock_exclusive();
        }
        let process_order = query
            .one(tx.conn())
            .await
            .map_err(|e| {
                error!(inv_no, "Failed to look up invoice: {}", e);
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Invoice number not found".to_string()))?;

        let existing = driver_order::Entity::find()
            .filter(driver_order::Column::OrderId.eq(process_order.id))
            .filter(driver_order::Column::DrvStatus.ne(DriverOrderStatus::ReturnReceived))
            .order_by_desc(driver_order::Column::Id)
            .find_also_related(collection_officer::Entity)
            .one(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?;

        if let Some((assignment, holder)) = existing {
            if assignment.driver_id == driver_id {
                return Err(ServiceError::AlreadyAssigned {
                    message: "This order is already in your target list.".to_string(),
                    driver_emp_id: driver.emp_id,
                    driver_name: None,
                });
            }
            let (holder_emp_id, holder_name) = holder
                .map(|officer| (officer.emp_id.clone(), Some(officer.full_name())))
                .unwrap_or_else(|| (assignment.driver_id.to_string(), None));
            warn!(
                inv_no,
                holder = %holder_emp_id,
                "order already assigned to another driver"
            );
            return Err(ServiceError::AlreadyAssigned {
                message: format!(
                    "This order has already been assigned to another driver (Driver ID: {}).",
                    holder_emp_id
                ),
                driver_emp_id: holder_emp_id,
                driver_name: holder_name,
            });
        }

        let now = Utc::now();
        let created = driver_order::ActiveModel {
            driver_id: Set(driver_id),
            order_id: Set(process_order.id),
            drv_status: Set(DriverOrderStatus::Todo),
            is_hand_over: Set(false),
            hand_over_time: Set(now + self.hand_over_window),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(tx.conn())
        .await
        .map_err(|e| {
            error!(inv_no, "Failed to insert driver order: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        process_order::Entity::update_many()
            .col_expr(
                process_order::Column::Status,
                Expr::value(ProcessOrderStatus::Collected.to_string()),
            )
            .filter(process_order::Column::Id.eq(process_order.id))
            .exec(tx.conn())
            .await
            .map_err(ServiceError::DatabaseError)?;

        tx.commit().await?;

        info!(
            driver_id,
            driver_order_id = created.id,
            inv_no,
            "order assigned to driver"
        );

        Ok(AssignedOrder {
            driver_order_id: created.id,
            order_id: process_order.id,
            inv_no: process_order.inv_no,
            hand_over_time: created.hand_over_time,
            driver_emp_id: driver.emp_id,
            assigned_at: now,
        })
    }

    /// Driver's orders newest first, filtered by status and hand-over flag
    #[instrument(skip(self))]
    pub async fn list_driver_orders(
        &self,
        driver_id: i32,
        filter: DriverOrderFilter,
    ) -> Result<DriverOrderList, ServiceError> {
        let db = &*self.db;
        let mut query = driver_order::Entity::find()
            .filter(driver_order::Column::DriverId.eq(driver_id))
            .filter(driver_order::Column::IsHandOver.eq(filter.is_hand_over));
        if !filter.statuses.is_empty() {
            query = query.filter(driver_order::Column::DrvStatus.is_in(filter.statuses.clone()));
        }

        let rows = query
            .order_by_desc(driver_order::Column::CreatedAt)
            .order_by_desc(driver_order::Column::Id)
            .find_also_related(process_order::Entity)
            .all(db)
            .await
            .map_err(|e| {
                error!(driver_id, "Failed to list driver orders: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        let market_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, po)| po.as_ref().map(|po| po.order_id))
            .collect();
        let markets = load_market_orders(db, market_ids).await?;

        let orders: Vec<DriverOrderSummary> = rows
            .into_iter()
            .filter_map(|(drv, po)| {
                let po = po?;
                let market = markets.get(&po.order_id)?;
                Some(DriverOrderSummary {
                    driver_order_id: drv.id,
                    order_id: po.id,
                    inv_no: po.inv_no,
                    drv_status: drv.drv_status,
                    is_hand_over: drv.is_hand_over,
                    hand_over_time: drv.hand_over_time,
                    payment_method: po.payment_method,
                    is_paid: po.is_paid,
                    amount: po.amount,
                    full_total: market.full_total,
                    title: market.title.clone(),
                    full_name: market.full_name.clone(),
                    phone_code1: market.phone_code1.clone(),
                    phone1: market.phone1.clone(),
                    address: market.address_line(),
                    delivery_type: market.delivery_type.clone(),
                    schedule_date: market.schedule_date,
                    schedule_time: market.schedule_time.clone(),
                    start_time: drv.start_time,
                    complete_time: drv.complete_time,
                    created_at: drv.created_at,
                })
            })
            .collect();

        Ok(DriverOrderList {
            total_orders: orders.len(),
            orders,
        })
    }

    /// Customer details of one of the driver's orders
    #[instrument(skip(self))]
    pub async fn get_order_user_details(
        &self,
        driver_id: i32,
        order_id: i32,
    ) -> Result<OrderUserDetails, ServiceError> {
        let db = &*self.db;
        let (drv, po) = driver_order::Entity::find()
            .filter(driver_order::Column::DriverId.eq(driver_id))
            .filter(driver_order::Column::OrderId.eq(order_id))
            .order_by_desc(driver_order::Column::Id)
            .find_also_related(process_order::Entity)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound("Order not found in your target list".to_string())
            })?;
        let po = po.ok_or_else(|| ServiceError::NotFound("Order not found".to_string()))?;

        let market = market_order::Entity::find_by_id(po.order_id)
            .one(db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Order details not found".to_string()))?;

        Ok(OrderUserDetails {
            order_id: po.id,
            driver_order_id: drv.id,
            inv_no: po.inv_no,
            drv_status: drv.drv_status,
            address: market.address_line(),
            title: market.title,
            full_name: market.full_name,
            phone_code1: market.phone_code1,
            phone1: market.phone1,
            phone_code2: market.phone_code2,
            phone2: market.phone2,
            building_type: market.building_type,
            house_no: market.house_no,
            street_name: market.street_name,
            city: market.city,
            delivery_type: market.delivery_type,
            schedule_date: market.schedule_date,
            schedule_time: market.schedule_time,
            payment_method: po.payment_method,
            is_paid: po.is_paid,
            full_total: market.full_total,
        })
    }
}

/// Market orders keyed by id
pub(crate) async fn load_market_orders<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, market_order::Model>, ServiceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = market_order::Entity::find()
        .filter(market_order::Column::Id.is_in(ids))
        .all(conn)
        .await
        .map_err(ServiceError::DatabaseError)?;
    Ok(rows.into_iter().map(|m| (m.id, m)).collect())
}
