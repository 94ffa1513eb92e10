#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;
use transporter_api::{
    app_router,
    config::AppConfig,
    db::{self, DbConfig},
    entities::{
        collection_officer, complain_category, hold_reason, market_order, process_order,
        return_reason, system_application, vehicle_registration,
    },
    AppState,
};

pub const PASSWORD: &str = "secret123";
pub const BASE: &str = "/transporter";

/// Application state and router backed by a fresh in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            "test".to_string(),
        );
        cfg.bcrypt_cost = 4;
        adjust(&mut cfg);

        // a single connection keeps the in-memory database alive and shared
        let pool = db::establish_connection_with_config(&DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());
        Self { router, state }
    }

    pub fn db(&self) -> &sea_orm::DatabaseConnection {
        &self.state.db
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("{}{}", BASE, path));

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        self.send(builder.body(body).expect("failed to build request"))
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, path: &str, token: &str) -> Response {
        self.request(Method::GET, path, None, Some(token)).await
    }

    pub async fn post(&self, path: &str, body: Value, token: &str) -> Response {
        self.request(Method::POST, path, Some(body), Some(token)).await
    }

    pub async fn officer(
        &self,
        emp_id: &str,
        job_role: &str,
        status: &str,
        centre: Option<i32>,
    ) -> collection_officer::Model {
        let password = self
            .state
            .auth
            .hash_password(PASSWORD)
            .await
            .expect("hash password");
        collection_officer::ActiveModel {
            emp_id: Set(emp_id.to_string()),
            first_name_english: Set(format!("First{}", emp_id)),
            last_name_english: Set("Tester".to_string()),
            phone_code01: Set(Some("+94".to_string())),
            phone_number01: Set(Some("771234567".to_string())),
            nic: Set(Some("199012345678".to_string())),
            job_role: Set(job_role.to_string()),
            status: Set(status.to_string()),
            password: Set(password),
            password_updated: Set(false),
            distributed_center_id: Set(centre),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed officer")
    }

    /// Approved driver in centre 1
    pub async fn driver(&self, emp_id: &str) -> collection_officer::Model {
        self.officer(
            emp_id,
            collection_officer::JOB_ROLE_DRIVER,
            collection_officer::STATUS_APPROVED,
            Some(1),
        )
        .await
    }

    pub async fn vehicle(&self, officer_id: i32, v_type: &str, v_reg_no: &str) {
        vehicle_registration::ActiveModel {
            co_id: Set(officer_id),
            v_type: Set(v_type.to_string()),
            v_reg_no: Set(v_reg_no.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed vehicle");
    }

    pub fn token_for(&self, officer: &collection_officer::Model) -> String {
        self.state
            .auth
            .generate_token(&officer.emp_id, officer.id, officer.password_updated)
            .expect("issue token")
            .token
    }

    /// Market order plus process order carrying `inv_no`
    pub async fn order(&self, inv_no: &str, payment: &str, total: Decimal) -> process_order::Model {
        let now = Utc::now();
        let market = market_order::ActiveModel {
            title: Set(Some("Mr".to_string())),
            full_name: Set(Some(format!("Customer {}", inv_no))),
            phone_code1: Set(Some("+94".to_string())),
            phone1: Set(Some("770000000".to_string())),
            house_no: Set(Some("12".to_string())),
            street_name: Set(Some("Main Street".to_string())),
            city: Set(Some("Kandy".to_string())),
            full_total: Set(total),
            delivery_type: Set(Some("Delivery".to_string())),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed market order");

        process_order::ActiveModel {
            order_id: Set(market.id),
            inv_no: Set(inv_no.to_string()),
            payment_method: Set(payment.to_string()),
            amount: Set(total),
            is_paid: Set(false),
            status: Set("Processing".to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed process order")
    }

    /// Assigns `inv_no` to the driver behind `token` and returns the process order id
    pub async fn assign(&self, inv_no: &str, token: &str) -> i64 {
        let response = self
            .post(
                "/api/order/assign-driver-order",
                serde_json::json!({ "invNo": inv_no }),
                token,
            )
            .await;
        assert_eq!(response.status(), 201, "assign {}", inv_no);
        let body = response_json(response).await;
        body["data"]["orderId"].as_i64().expect("orderId")
    }

    pub async fn hold_reason(&self, index_no: i32, text: &str) -> hold_reason::Model {
        hold_reason::ActiveModel {
            index_no: Set(index_no),
            rsn_english: Set(text.to_string()),
            rsn_sinhala: Set(String::new()),
            rsn_tamil: Set(String::new()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed hold reason")
    }

    pub async fn return_reason(&self, index_no: i32, text: &str) -> return_reason::Model {
        return_reason::ActiveModel {
            index_no: Set(index_no),
            rsn_english: Set(text.to_string()),
            rsn_sinhala: Set(String::new()),
            rsn_tamil: Set(String::new()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed return reason")
    }

    pub async fn application(&self, name: &str) -> system_application::Model {
        system_application::ActiveModel {
            app_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed application")
    }

    pub async fn category(&self, app_id: i32, name: &str) -> complain_category::Model {
        complain_category::ActiveModel {
            app_id: Set(app_id),
            category_english: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("seed complaint category")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Parses a decimal that may be serialized as a string or a number
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        other => other.to_string().parse().expect("decimal number"),
    }
}
