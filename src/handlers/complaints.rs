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
    handlers::common::ApiJson,
    services::complaints::{ComplainCategory, ComplaintCreated, DriverComplaint},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddComplainRequest {
    #[validate(range(min = 1, message = "complainCategory must be a positive integer"))]
    pub complain_category: i32,
    #[validate(length(min = 1, max = 2000, message = "Complaint must be 1 to 2000 characters"))]
    pub complain: String,
}

pub fn complain_routes(auth_service: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .route("/add-complain", post(add_complain))
        .route("/complain-categories", get(get_complain_categories))
        .route("/my-complains", get(get_my_complains))
        .with_auth(auth_service)
}

#[utoipa::path(
    post,
    path = "/api/complain/add-complain",
    summary = "Submit a complaint",
    request_body = AddComplainRequest,
    responses(
        (status = 200, description = "Complaint saved with its reference number", body = ApiResponse<ComplaintCreated>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Officer or category not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "complain"
)]
pub async fn add_complain(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<AddComplainRequest>,
) -> ApiResult<ComplaintCreated> {
    payload.validate()?;
    let created = state
        .services
        .complaints
        .add_complain(user.officer_id, payload.complain_category, &payload.complain)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Complaint submitted successfully",
        created,
    )))
}

#[utoipa::path(
    get,
    path = "/api/complain/complain-categories",
    summary = "Complaint categories",
    responses(
        (status = 200, description = "Categories ordered by English name", body = ApiResponse<Vec<ComplainCategory>>),
        (status = 404, description = "Application not registered", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "complain"
)]
pub async fn get_complain_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> ApiResult<Vec<ComplainCategory>> {
    let categories = state.services.complaints.get_complain_categories().await?;
    Ok(Json(ApiResponse::with_message(
        "Complaint categories fetched successfully",
        categories,
    )))
}

#[utoipa::path(
    get,
    path = "/api/complain/my-complains",
    summary = "Driver's complaints",
    responses(
        (status = 200, description = "Complaints newest first", body = ApiResponse<Vec<DriverComplaint>>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "complain"
)]
pub async fn get_my_complains(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Vec<DriverComplaint>> {
    let complaints = state
        .services
        .complaints
        .get_my_complains(user.officer_id)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Complaints fetched successfully",
        complaints,
    )))
}
