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
    services::holds::{HoldSubmitResult, Reason},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitHoldRequest {
    #[validate(custom = "validate_order_ids")]
    pub order_ids: Vec<i32>,
    #[validate(range(min = 1, message = "holdReasonId must be a positive integer"))]
    pub hold_reason_id: i32,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

pub fn hold_routes(auth_service: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .route("/reason", get(get_hold_reasons))
        .route("/submit", post(submit_hold))
        .with_auth(auth_service)
}

#[utoipa::path(
    get,
    path = "/api/hold/reason",
    summary = "Hold reasons",
    responses(
        (status = 200, description = "Reasons ordered by index", body = ApiResponse<Vec<Reason>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hold"
)]
pub async fn get_hold_reasons(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Vec<Reason>> {
    let reasons = state.services.holds.get_reasons().await?;
    Ok(Json(ApiResponse::with_message(
        "Hold reasons fetched successfully",
        reasons,
    )))
}

#[utoipa::path(
    post,
    path = "/api/hold/submit",
    summary = "Put orders on hold",
    request_body = SubmitHoldRequest,
    responses(
        (status = 200, description = "Orders held", body = ApiResponse<HoldSubmitResult>),
        (status = 400, description = "Invalid request or status", body = crate::errors::ErrorResponse),
        (status = 404, description = "Reason or orders not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Order already on hold", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hold"
)]
pub async fn submit_hold(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<SubmitHoldRequest>,
) -> ApiResult<HoldSubmitResult> {
    payload.validate()?;
    let result = state
        .services
        .holds
        .submit_hold(
            user.officer_id,
            payload.order_ids,
            payload.hold_reason_id,
            payload.note,
        )
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Orders put on hold successfully",
        result,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_longer_than_limit_fails() {
        let req = SubmitHoldRequest {
            order_ids: vec![1],
            hold_reason_id: 2,
            note: Some("x".repeat(501)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_reason_fails() {
        let req = SubmitHoldRequest {
            order_ids: vec![1],
            hold_reason_id: 0,
            note: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("hold_reason_id"));
    }
}
