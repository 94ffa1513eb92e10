//! Home screen totals and cash hand-over to a receiving officer.

mod common;

use axum::http::StatusCode;
use common::{decimal, response_json, TestApp};
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use serde_json::json;
use transporter_api::entities::{collection_officer, driver_order};

const OFFICER_ROLE: &str = "Distribution Officer";

/// Assigns, starts and completes `inv_no`, returning the process order id
async fn deliver(app: &TestApp, inv_no: &str, token: &str) -> i64 {
    let order_id = app.assign(inv_no, token).await;
    let response = app
        .post("/api/order/start-journey", json!({ "orderId": order_id }), token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .post("/api/order/complete-order", json!({ "orderId": order_id }), token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    order_id
}

#[tokio::test]
async fn get_amount_starts_at_zero() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;

    let response = app
        .get("/api/home/get-amount", &app.token_for(&driver))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Amount fetched successfully");
    assert_eq!(body["data"]["totalOrders"], 0);
    assert_eq!(decimal(&body["data"]["totalCashAmount"]), dec!(0));
}

#[tokio::test]
async fn get_amount_counts_todays_orders() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    app.order("INV0001", "Cash", dec!(100.50)).await;
    app.order("INV0002", "Card", dec!(80.00)).await;
    app.order("INV0003", "Cash", dec!(20.25)).await;
    app.assign("INV0001", &token).await;
    app.assign("INV0002", &token).await;
    deliver(&app, "INV0003", &token).await;

    let response = app.get("/api/home/get-amount", &token).await;
    let body = response_json(response).await;
    let data = &body["data"];
    assert_eq!(data["totalOrders"], 3);
    assert_eq!(data["todoOrders"], 2);
    assert_eq!(data["completedOrders"], 1);
    assert_eq!(data["cashOrders"], 2);
    assert_eq!(decimal(&data["totalCashAmount"]), dec!(120.75));
}

#[tokio::test]
async fn received_cash_lists_completed_cash_orders() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    app.order("INV0001", "Cash", dec!(250.50)).await;
    app.order("INV0002", "Card", dec!(99.00)).await;
    app.order("INV0003", "Cash", dec!(10.00)).await;
    deliver(&app, "INV0001", &token).await;
    deliver(&app, "INV0002", &token).await;
    app.assign("INV0003", &token).await;

    let response = app.get("/api/home/get-received-cash", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["orderCount"], 1);
    assert_eq!(body["data"]["orders"][0]["invNo"], "INV0001");
    assert_eq!(decimal(&body["data"]["totalAmount"]), dec!(250.50));
}

#[tokio::test]
async fn hand_over_marks_orders_and_is_not_repeatable() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let officer = app
        .officer("DIO00001", OFFICER_ROLE, collection_officer::STATUS_APPROVED, Some(1))
        .await;
    let token = app.token_for(&driver);
    app.order("INV0001", "Cash", dec!(250.50)).await;
    app.order("INV0002", "Cash", dec!(100.00)).await;
    let first = deliver(&app, "INV0001", &token).await;
    let second = deliver(&app, "INV0002", &token).await;

    let payload = json!({
        "orderIds": [first, second],
        "totalAmount": "350.50",
        "officerId": "DIO00001",
    });
    let response = app
        .post("/api/home/hand-over-cash", payload.clone(), &token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Cash handed over successfully");
    assert_eq!(body["data"]["empId"], "DIO00001");
    assert_eq!(body["data"]["officerId"], officer.id);
    assert_eq!(body["data"]["orderCount"], 2);
    assert_eq!(decimal(&body["data"]["totalAmount"]), dec!(350.50));

    let rows = driver_order::Entity::find().all(app.db()).await.unwrap();
    assert!(rows.iter().all(|d| d.is_hand_over));
    assert!(rows.iter().all(|d| d.hand_over_officer == Some(officer.id)));
    assert!(rows.iter().all(|d| d.handed_over_at.is_some()));

    let response = app.post("/api/home/hand-over-cash", payload, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // handed-over orders leave the received cash list
    let response = app.get("/api/home/get-received-cash", &token).await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["orderCount"], 0);
}

#[tokio::test]
async fn hand_over_rejects_amount_mismatch() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    app.officer("DIO00001", OFFICER_ROLE, collection_officer::STATUS_APPROVED, Some(1))
        .await;
    let token = app.token_for(&driver);
    app.order("INV0001", "Cash", dec!(250.50)).await;
    let order_id = deliver(&app, "INV0001", &token).await;

    let response = app
        .post(
            "/api/home/hand-over-cash",
            json!({ "orderIds": [order_id], "totalAmount": "250.00", "officerId": "DIO00001" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let row = driver_order::Entity::find().one(app.db()).await.unwrap().unwrap();
    assert!(!row.is_hand_over);
}

#[tokio::test]
async fn hand_over_requires_completed_cash_orders() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    app.officer("DIO00001", OFFICER_ROLE, collection_officer::STATUS_APPROVED, Some(1))
        .await;
    let token = app.token_for(&driver);
    app.order("INV0001", "Cash", dec!(10.00)).await;
    app.order("INV0002", "Card", dec!(20.00)).await;
    let pending = app.assign("INV0001", &token).await;
    let card = deliver(&app, "INV0002", &token).await;

    for (order_id, amount) in [(pending, "10.00"), (card, "20.00")] {
        let response = app
            .post(
                "/api/home/hand-over-cash",
                json!({ "orderIds": [order_id], "totalAmount": amount, "officerId": "DIO00001" }),
                &token,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT, "order {}", order_id);
    }
}

#[tokio::test]
async fn hand_over_checks_the_receiving_officer() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    app.officer("DIO00002", OFFICER_ROLE, collection_officer::STATUS_APPROVED, Some(2))
        .await;
    app.officer("DIO00003", OFFICER_ROLE, "Not Approved", Some(1))
        .await;
    let token = app.token_for(&driver);
    app.order("INV0001", "Cash", dec!(10.00)).await;
    let order_id = deliver(&app, "INV0001", &token).await;

    let attempt = |officer: &'static str| {
        json!({ "orderIds": [order_id], "totalAmount": "10.00", "officerId": officer })
    };

    let response = app
        .post("/api/home/hand-over-cash", attempt("NOBODY"), &token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Officer not found in the system");

    let response = app
        .post("/api/home/hand-over-cash", attempt("DIO00003"), &token)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post("/api/home/hand-over-cash", attempt("DIO00002"), &token)
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post("/api/home/hand-over-cash", attempt("  "), &token)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Officer Employee ID is required");
}

#[tokio::test]
async fn hand_over_needs_orders() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);

    let response = app
        .post(
            "/api/home/hand-over-cash",
            json!({ "orderIds": [], "totalAmount": "0", "officerId": "DIO00001" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "No orders selected");
}

#[tokio::test]
async fn hand_over_bounds_the_order_ids() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);

    let response = app
        .post(
            "/api/home/hand-over-cash",
            json!({ "orderIds": [], "officerId": "DIO00001" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "No orders selected");

    let too_many: Vec<i32> = (1..=201).collect();
    let response = app
        .post(
            "/api/home/hand-over-cash",
            json!({ "orderIds": too_many, "totalAmount": "0", "officerId": "DIO00001" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Validation error");

    let response = app
        .post(
            "/api/home/hand-over-cash",
            json!({ "orderIds": [-1], "totalAmount": "0", "officerId": "DIO00001" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Validation error");
}
