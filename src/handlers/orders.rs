use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    auth::{AuthRouterExt, AuthService, AuthUser},
    handlers::common::ApiJson,
    errors::ServiceError,
    models::DriverOrderStatus,
    services::{
        order_status::OrderTransition,
        orders::{AssignedOrder, DriverOrderFilter, DriverOrderList, OrderUserDetails},
    },
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignOrderRequest {
    #[serde(default)]
    pub inv_no: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DriverOrdersQuery {
    /// Comma separated statuses, e.g. `todo,on the way`
    pub status: Option<String>,
    /// `0` for orders still held by the driver, `1` for handed over
    pub is_hand_over: Option<String>,
}

impl DriverOrdersQuery {
    pub fn into_filter(self) -> Result<DriverOrderFilter, ServiceError> {
        let mut statuses = Vec::new();
        for raw in self
            .status
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let status = DriverOrderStatus::parse_filter(raw)
                .ok_or_else(|| ServiceError::BadRequest(format!("Invalid status: {}", raw)))?;
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }

        let is_hand_over = match self.is_hand_over.as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ServiceError::BadRequest(format!(
                    "Invalid isHandOver value: {}",
                    other
                )))
            }
        };

        Ok(DriverOrderFilter {
            statuses,
            is_hand_over,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdQuery {
    pub order_id: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartJourneyRequest {
    #[validate(range(min = 1, message = "orderId must be a positive integer"))]
    pub order_id: i32,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOrderRequest {
    #[validate(range(min = 1, message = "orderId must be a positive integer"))]
    pub order_id: i32,
    /// Customer signature reference
    pub signature: Option<String>,
}

pub fn order_routes(auth_service: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .route("/assign-driver-order", post(assign_driver_order))
        .route("/get-driver-orders", get(get_driver_orders))
        .route("/get-order-user-details", get(get_order_user_details))
        .route("/start-journey", post(start_journey))
        .route("/complete-order", post(complete_order))
        .with_auth(auth_service)
}

#[utoipa::path(
    post,
    path = "/api/order/assign-driver-order",
    summary = "Assign order by invoice",
    description = "Adds the order behind a scanned invoice number to the driver's target list",
    request_body = AssignOrderRequest,
    responses(
        (status = 201, description = "Order assigned", body = ApiResponse<AssignedOrder>),
        (status = 400, description = "Invoice number missing", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Driver or invoice not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order already assigned", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn assign_driver_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<AssignOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AssignedOrder>>), ServiceError> {
    let assigned = state
        .services
        .orders
        .assign_driver_order(user.officer_id, &payload.inv_no)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Order assigned successfully to your target list",
            assigned,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/order/get-driver-orders",
    summary = "List driver orders",
    params(DriverOrdersQuery),
    responses(
        (status = 200, description = "Driver orders, newest first", body = ApiResponse<DriverOrderList>),
        (status = 400, description = "Unknown status filter", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn get_driver_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DriverOrdersQuery>,
) -> ApiResult<DriverOrderList> {
    let filter = query.into_filter()?;
    let list = state
        .services
        .orders
        .list_driver_orders(user.officer_id, filter)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Driver orders fetched successfully",
        list,
    )))
}

#[utoipa::path(
    get,
    path = "/api/order/get-order-user-details",
    summary = "Customer details of an assigned order",
    params(OrderIdQuery),
    responses(
        (status = 200, description = "Customer and address details", body = ApiResponse<OrderUserDetails>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not in the driver's list", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn get_order_user_details(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderIdQuery>,
) -> ApiResult<OrderUserDetails> {
    let details = state
        .services
        .orders
        .get_order_user_details(user.officer_id, query.order_id)
        .await?;
    Ok(Json(ApiResponse::success(details)))
}

#[utoipa::path(
    post,
    path = "/api/order/start-journey",
    summary = "Start journey",
    description = "Moves a Todo or Hold order to On the way",
    request_body = StartJourneyRequest,
    responses(
        (status = 200, description = "Journey started", body = ApiResponse<OrderTransition>),
        (status = 400, description = "Invalid status", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Another order is already on the way", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn start_journey(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<StartJourneyRequest>,
) -> ApiResult<OrderTransition> {
    payload.validate()?;
    let result = state
        .services
        .order_status
        .start_journey(user.officer_id, payload.order_id)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Journey started successfully",
        result,
    )))
}

#[utoipa::path(
    post,
    path = "/api/order/complete-order",
    summary = "Complete order",
    request_body = CompleteOrderRequest,
    responses(
        (status = 200, description = "Order completed", body = ApiResponse<OrderTransition>),
        (status = 400, description = "Invalid status", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order already completed", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn complete_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CompleteOrderRequest>,
) -> ApiResult<OrderTransition> {
    payload.validate()?;
    let result = state
        .services
        .order_status
        .complete_order(user.officer_id, payload.order_id, payload.signature)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Order completed successfully",
        result,
    )))
}
