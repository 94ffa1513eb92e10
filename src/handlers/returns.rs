use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    auth::{AuthRouterExt, AuthService, AuthUser},
    handlers::common::{validate_order_ids, ApiJson},
    services::{
        holds::Reason,
        order_status::ReturnReceivedResult,
        returns::{DriverReturnOrder, ReturnSubmitResult},
    },
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReturnRequest {
    #[validate(custom = "validate_order_ids")]
    pub order_ids: Vec<i32>,
    #[validate(range(min = 1, message = "returnReasonId must be a positive integer"))]
    pub return_reason_id: i32,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceivedRequest {
    #[validate(custom = "validate_order_ids")]
    pub order_ids: Vec<i32>,
}

pub fn return_routes(auth_service: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .route("/reason", get(get_return_reasons))
        .route("/submit", post(submit_return))
        .route("/get-driver-return-orders", get(get_driver_return_orders))
        .route("/update-return-received", post(update_return_received))
        .with_auth(auth_service)
}

#[utoipa::path(
    get,
    path = "/api/return/reason",
    summary = "Return reasons",
    responses(
        (status = 200, description = "Reasons ordered by index", body = ApiResponse<Vec<Reason>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "return"
)]
pub async fn get_return_reasons(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Vec<Reason>> {
    let reasons = state.services.returns.get_reasons().await?;
    Ok(Json(ApiResponse::with_message(
        "Return reasons fetched successfully",
        reasons,
    )))
}

#[utoipa::path(
    post,
    path = "/api/return/submit",
    summary = "Return orders",
    request_body = SubmitReturnRequest,
    responses(
        (status = 200, description = "Orders returned", body = ApiResponse<ReturnSubmitResult>),
        (status = 400, description = "Invalid request or status", body = crate::errors::ErrorResponse),
        (status = 404, description = "Reason or orders not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order already returned", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "return"
)]
pub async fn submit_return(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<SubmitReturnRequest>,
) -> ApiResult<ReturnSubmitResult> {
    payload.validate()?;
    let result = state
        .services
        .returns
        .submit_return(
            user.officer_id,
            payload.order_ids,
            payload.return_reason_id,
            payload.note,
        )
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Orders returned successfully",
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/return/get-driver-return-orders",
    summary = "Returned orders of the driver",
    responses(
        (status = 200, description = "Orders in Return with their reason", body = ApiResponse<Vec<DriverReturnOrder>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "return"
)]
pub async fn get_driver_return_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Vec<DriverReturnOrder>> {
    let orders = state
        .services
        .returns
        .list_driver_return_orders(user.officer_id)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Return orders fetched successfully",
        orders,
    )))
}

#[utoipa::path(
    post,
    path = "/api/return/update-return-received",
    summary = "Acknowledge returned parcels",
    request_body = ReturnReceivedRequest,
    responses(
        (status = 200, description = "Orders marked Return Received", body = ApiResponse<ReturnReceivedResult>),
        (status = 400, description = "Order not in Return", body = crate::errors::ErrorResponse),
        (status = 404, description = "Orders not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Already received", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "return"
)]
pub async fn update_return_received(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ReturnReceivedRequest>,
) -> ApiResult<ReturnReceivedResult> {
    payload.validate()?;
    let result = state
        .services
        .order_status
        .update_return_received(user.officer_id, payload.order_ids)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Return received status updated successfully",
        result,
    )))
}
