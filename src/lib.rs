//! Transporter API
//!
//! Backend for delivery drivers: invoice-scan assignment, the driver order
//! lifecycle, hold and return flows, cash hand-over and complaints.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

use crate::auth::AuthService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub auth: Arc<AuthService>,
    pub services: handlers::AppServices,
    pub started_at: Instant,
}

impl AppState {
    /// Wires services from a connected pool and the loaded configuration
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let auth = Arc::new(AuthService::new(auth::AuthConfig::from(&config)));
        let services = handlers::AppServices::new(db.clone(), auth.clone(), &config);
        Self {
            db,
            config,
            auth,
            services,
            started_at: Instant::now(),
        }
    }
}

// Common response wrapper
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always "success"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: None,
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Driver API routes, relative to the base path
pub fn api_routes(auth: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", handlers::auth::auth_routes(auth.clone()))
        .nest("/api/order", handlers::orders::order_routes(auth.clone()))
        .nest("/api/hold", handlers::holds::hold_routes(auth.clone()))
        .nest("/api/return", handlers::returns::return_routes(auth.clone()))
        .nest("/api/home", handlers::home::home_routes(auth.clone()))
        .nest("/api/complain", handlers::complaints::complain_routes(auth))
        .route("/health", get(handlers::health::health))
        .route("/healthz", get(handlers::health::health))
}

/// Full application router: routes under the configured base path plus
/// request ids, HTTP tracing and the body size limit.
pub fn app_router(state: AppState) -> Router {
    let routes = api_routes(state.auth.clone());
    let base = state.config.base_path.trim_end_matches('/');
    let router = if base.is_empty() {
        Router::new().merge(routes)
    } else {
        Router::new().nest(base, routes)
    };

    router
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(crate::tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
