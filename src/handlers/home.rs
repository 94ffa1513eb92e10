use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    auth::{AuthRouterExt, AuthService, AuthUser},
    handlers::common::{validate_order_id_bounds, ApiJson},
    services::cash::{AmountSummary, HandOverResult, ReceivedCash},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandOverRequest {
    /// An empty list is answered with "No orders selected"
    #[serde(default)]
    #[validate(custom = "validate_order_id_bounds")]
    pub order_ids: Vec<i32>,
    #[serde(default)]
    #[schema(value_type = String, example = "1250.00")]
    pub total_amount: Decimal,
    /// Employee id of the receiving officer
    #[serde(default)]
    pub officer_id: String,
}

pub fn home_routes(auth_service: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .route("/get-amount", get(get_amount))
        .route("/get-received-cash", get(get_received_cash))
        .route("/hand-over-cash", post(hand_over_cash))
        .with_auth(auth_service)
}

#[utoipa::path(
    get,
    path = "/api/home/get-amount",
    summary = "Today's totals",
    description = "Counts and cash total of today's driver orders not yet handed over",
    responses(
        (status = 200, description = "Dashboard totals", body = ApiResponse<AmountSummary>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "home"
)]
pub async fn get_amount(State(state): State<AppState>, user: AuthUser) -> ApiResult<AmountSummary> {
    let summary = state
        .services
        .cash
        .get_amount(user.officer_id, Utc::now())
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Amount fetched successfully",
        summary,
    )))
}

#[utoipa::path(
    get,
    path = "/api/home/get-received-cash",
    summary = "Cash waiting for hand-over",
    responses(
        (status = 200, description = "Completed cash orders not yet handed over", body = ApiResponse<ReceivedCash>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "home"
)]
pub async fn get_received_cash(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<ReceivedCash> {
    let cash = state
        .services
        .cash
        .get_received_cash(user.officer_id)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Received cash fetched successfully",
        cash,
    )))
}

#[utoipa::path(
    post,
    path = "/api/home/hand-over-cash",
    summary = "Hand over collected cash",
    request_body = HandOverRequest,
    responses(
        (status = 200, description = "Cash handed over", body = ApiResponse<HandOverResult>),
        (status = 400, description = "No orders, missing officer or amount mismatch", body = crate::errors::ErrorResponse),
        (status = 403, description = "Officer in another distribution centre", body = crate::errors::ErrorResponse),
        (status = 404, description = "Officer not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order not eligible or already handed over", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "home"
)]
pub async fn hand_over_cash(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<HandOverRequest>,
) -> ApiResult<HandOverResult> {
    payload.validate()?;
    let result = state
        .services
        .cash
        .hand_over_cash(
            user.officer_id,
            payload.order_ids,
            payload.total_amount,
            &payload.officer_id,
        )
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Cash handed over successfully",
        result,
    )))
}
