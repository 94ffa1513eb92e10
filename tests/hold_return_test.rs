//! Hold and return batches plus the return-received acknowledgement.

mod common;

use axum::http::StatusCode;
use common::{decimal, response_json, TestApp};
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use transporter_api::entities::{driver_hold_order, driver_return_order, process_order};

#[tokio::test]
async fn reasons_are_listed_by_index() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    app.hold_reason(2, "Customer not at home").await;
    app.hold_reason(1, "Vehicle breakdown").await;
    app.return_reason(1, "Customer refused").await;

    let response = app.get("/api/hold/reason", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Hold reasons fetched successfully");
    let reasons = body["data"].as_array().unwrap();
    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0]["rsnEnglish"], "Vehicle breakdown");
    assert_eq!(reasons[1]["indexNo"], 2);

    let response = app.get("/api/return/reason", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"][0]["rsnEnglish"], "Customer refused");
}

#[tokio::test]
async fn hold_batch_records_reason_per_order() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    let reason = app.hold_reason(1, "Customer not at home").await;
    app.order("INV0001", "Cash", dec!(100.00)).await;
    app.order("INV0002", "Card", dec!(200.00)).await;
    let first = app.assign("INV0001", &token).await;
    let second = app.assign("INV0002", &token).await;

    let response = app
        .post(
            "/api/hold/submit",
            json!({
                "orderIds": [first, second, first],
                "holdReasonId": reason.id,
                "note": "  call later  ",
            }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Orders put on hold successfully");
    assert_eq!(body["data"]["driverOrdersUpdated"], 2);
    assert_eq!(body["data"]["processOrdersUpdated"], 2);
    assert_eq!(body["data"]["holdOrdersInserted"], 2);
    assert_eq!(body["data"]["invoiceNumbers"], json!(["INV0001", "INV0002"]));

    let holds = driver_hold_order::Entity::find().all(app.db()).await.unwrap();
    assert_eq!(holds.len(), 2);
    assert!(holds.iter().all(|h| h.note.as_deref() == Some("call later")));

    let po = process_order::Entity::find_by_id(first as i32)
        .one(app.db())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(po.status, "Hold");

    let response = app
        .post(
            "/api/hold/submit",
            json!({ "orderIds": [first], "holdReasonId": reason.id }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["message"], "This order is already on hold");
}

#[tokio::test]
async fn held_order_can_restart_its_journey() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    let reason = app.hold_reason(1, "Rain").await;
    app.order("INV0001", "Cash", dec!(100.00)).await;
    let order_id = app.assign("INV0001", &token).await;

    app.post(
        "/api/hold/submit",
        json!({ "orderIds": [order_id], "holdReasonId": reason.id }),
        &token,
    )
    .await;
    let response = app
        .post("/api/order/start-journey", json!({ "orderId": order_id }), &token)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["drvStatus"], "On the way");
}

#[tokio::test]
async fn completed_orders_cannot_be_held() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    let reason = app.hold_reason(1, "Rain").await;
    app.order("INV0001", "Card", dec!(100.00)).await;
    let order_id = app.assign("INV0001", &token).await;
    app.post("/api/order/start-journey", json!({ "orderId": order_id }), &token)
        .await;
    app.post("/api/order/complete-order", json!({ "orderId": order_id }), &token)
        .await;

    let response = app
        .post(
            "/api/hold/submit",
            json!({ "orderIds": [order_id], "holdReasonId": reason.id }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid status"));

    let count = driver_hold_order::Entity::find().count(app.db()).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn unknown_reason_and_foreign_orders_are_rejected() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let other = app.driver("DRV00002").await;
    let token = app.token_for(&driver);
    let reason = app.hold_reason(1, "Rain").await;
    app.order("INV0001", "Cash", dec!(100.00)).await;
    app.order("INV0002", "Cash", dec!(100.00)).await;
    let mine = app.assign("INV0001", &token).await;
    let theirs = app.assign("INV0002", &app.token_for(&other)).await;

    let response = app
        .post(
            "/api/hold/submit",
            json!({ "orderIds": [mine], "holdReasonId": reason.id + 100 }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Hold reason not found");

    let response = app
        .post(
            "/api/hold/submit",
            json!({ "orderIds": [mine, theirs], "holdReasonId": reason.id }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        format!("No driver orders found for order IDs: {}", theirs)
    );

    // nothing from the rejected batch was written
    let response = app.get("/api/order/get-driver-orders?status=hold", &token).await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["totalOrders"], 0);
}

#[tokio::test]
async fn batch_payloads_are_validated() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);

    let response = app
        .post(
            "/api/hold/submit",
            json!({ "orderIds": [], "holdReasonId": 0 }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Validation error");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("At least one order ID is required")));

    let too_many: Vec<i32> = (1..=201).collect();
    let response = app
        .post(
            "/api/return/update-return-received",
            json!({ "orderIds": too_many }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mistyped_order_ids_use_the_error_envelope() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);

    let response = app
        .post(
            "/api/hold/submit",
            json!({ "orderIds": "12", "holdReasonId": 1 }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn return_flow_through_receipt() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    let reason = app.return_reason(1, "Customer refused").await;
    app.order("INV0001", "Cash", dec!(350.25)).await;
    let order_id = app.assign("INV0001", &token).await;

    let response = app
        .post(
            "/api/return/submit",
            json!({ "orderIds": [order_id], "returnReasonId": reason.id, "note": "damaged box" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["returnOrdersInserted"], 1);
    assert_eq!(
        driver_return_order::Entity::find().count(app.db()).await.unwrap(),
        1
    );

    let response = app.get("/api/return/get-driver-return-orders", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["invNo"], "INV0001");
    assert_eq!(rows[0]["rsnEnglish"], "Customer refused");
    assert_eq!(rows[0]["note"], "damaged box");
    assert_eq!(decimal(&rows[0]["fullTotal"]), dec!(350.25));

    let response = app
        .post(
            "/api/return/submit",
            json!({ "orderIds": [order_id], "returnReasonId": reason.id }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .post(
            "/api/return/update-return-received",
            json!({ "orderIds": [order_id] }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Return received status updated successfully");
    assert_eq!(body["data"]["driverOrdersUpdated"], 1);

    let po = process_order::Entity::find_by_id(order_id as i32)
        .one(app.db())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(po.status, "Return Received");

    let response = app.get("/api/return/get-driver-return-orders", &token).await;
    let body = response_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // a received return frees the invoice for a new assignment
    let again = app.assign("INV0001", &token).await;
    assert_eq!(again, order_id);
}

#[tokio::test]
async fn return_received_requires_a_returned_order() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    app.order("INV0001", "Cash", dec!(100.00)).await;
    let order_id = app.assign("INV0001", &token).await;

    let response = app
        .post(
            "/api/return/update-return-received",
            json!({ "orderIds": [order_id] }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
