use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
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
    errors::ServiceError,
    services::accounts::{DriverProfile, LoginResponse},
    ApiResponse, ApiResult, AppState,
};

/// Login request payload
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 50, message = "EMP ID must be 3 to 50 characters"))]
    pub emp_id: String,
    #[validate(length(min = 6, max = 100, message = "Password must be 6 to 100 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, max = 100, message = "New password must be 6 to 100 characters"))]
    pub new_password: String,
}

pub fn auth_routes(auth_service: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .route("/change-password", post(change_password))
        .route("/user-profile", get(get_profile))
        .with_auth(auth_service)
        .route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    summary = "Driver login",
    description = "Checks driver credentials, returns a JWT and sets the authToken cookie",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>,
            headers(("Set-Cookie" = String, description = "HttpOnly authToken cookie"))
        ),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unknown, unapproved or rejected driver, or wrong password", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.emp_id = payload.emp_id.trim().to_string();
    payload.validate()?;

    let (data, issued) = state
        .services
        .accounts
        .login(&payload.emp_id, &payload.password)
        .await?;
    let cookie = state.auth.auth_cookie(&issued);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(ApiResponse::with_message("Login successful", data)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    summary = "Change password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing token or wrong current password", body = crate::errors::ErrorResponse),
        (status = 404, description = "Officer not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "auth"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    payload.validate()?;
    state
        .services
        .accounts
        .change_password(
            user.officer_id,
            &payload.current_password,
            &payload.new_password,
        )
        .await?;
    Ok(Json(ApiResponse::message("Password changed successfully")))
}

#[utoipa::path(
    get,
    path = "/api/auth/user-profile",
    summary = "Driver profile",
    responses(
        (status = 200, description = "Profile with vehicle registration", body = ApiResponse<DriverProfile>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Account not found or not approved", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "auth"
)]
pub async fn get_profile(State(state): State<AppState>, user: AuthUser) -> ApiResult<DriverProfile> {
    let profile = state.services.accounts.profile(&user.emp_id).await?;
    Ok(Json(ApiResponse::success(profile)))
}
