//! Driver complaints: categories, daily reference numbers and history.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{response_json, TestApp};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use transporter_api::{
    entities::driver_complain, models::business_day::local_date,
    services::complaints::complaint_ref_no,
};

#[tokio::test]
async fn categories_belong_to_the_transport_app() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    let transport = app.application("Transport").await;
    let other = app.application("Collection").await;
    app.category(transport.id, "Vehicle").await;
    app.category(transport.id, "Payment").await;
    app.category(other.id, "Produce quality").await;

    let response = app.get("/api/complain/complain-categories", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["categoryEnglish"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Payment", "Vehicle"]);
}

#[tokio::test]
async fn categories_need_a_registered_app() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;

    let response = app
        .get("/api/complain/complain-categories", &app.token_for(&driver))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Transport application not found");
}

#[tokio::test]
async fn reference_numbers_count_up_per_day() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let other = app.driver("DRV00002").await;
    let token = app.token_for(&driver);
    let transport = app.application("Transport").await;
    let category = app.category(transport.id, "Vehicle").await;
    let today = local_date(Utc::now(), app.state.config.business_offset());

    for seq in 1..=2 {
        let response = app
            .post(
                "/api/complain/add-complain",
                json!({ "complainCategory": category.id, "complain": "Tyre puncture on route" }),
                &token,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Complaint submitted successfully");
        assert_eq!(body["data"]["refNo"], complaint_ref_no("DRV00001", today, seq));
    }

    // sequences are kept per driver
    let response = app
        .post(
            "/api/complain/add-complain",
            json!({ "complainCategory": category.id, "complain": "Late payment" }),
            &app.token_for(&other),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["refNo"], complaint_ref_no("DRV00002", today, 1));
}

#[tokio::test]
async fn deleted_complaint_does_not_recycle_a_live_reference() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    let transport = app.application("Transport").await;
    let category = app.category(transport.id, "Vehicle").await;
    let today = local_date(Utc::now(), app.state.config.business_offset());
    let submit = json!({ "complainCategory": category.id, "complain": "Brake noise" });

    app.post("/api/complain/add-complain", submit.clone(), &token).await;
    app.post("/api/complain/add-complain", submit.clone(), &token).await;
    driver_complain::Entity::delete_many()
        .filter(driver_complain::Column::RefNo.eq(complaint_ref_no("DRV00001", today, 1)))
        .exec(app.db())
        .await
        .unwrap();

    let response = app.post("/api/complain/add-complain", submit, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["refNo"], complaint_ref_no("DRV00001", today, 3));
}

#[tokio::test]
async fn complaint_input_is_checked() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let token = app.token_for(&driver);
    let transport = app.application("Transport").await;
    let category = app.category(transport.id, "Vehicle").await;

    let response = app
        .post(
            "/api/complain/add-complain",
            json!({ "complainCategory": category.id, "complain": "   " }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Complaint text is required");

    let response = app
        .post(
            "/api/complain/add-complain",
            json!({ "complainCategory": category.id + 50, "complain": "Broken seat" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Complaint category not found");

    let response = app
        .post(
            "/api/complain/add-complain",
            json!({ "complainCategory": 0, "complain": "" }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn my_complains_lists_newest_first() {
    let app = TestApp::new().await;
    let driver = app.driver("DRV00001").await;
    let other = app.driver("DRV00002").await;
    let token = app.token_for(&driver);
    let transport = app.application("Transport").await;
    let category = app.category(transport.id, "Vehicle").await;

    for text in ["First issue", "Second issue"] {
        app.post(
            "/api/complain/add-complain",
            json!({ "complainCategory": category.id, "complain": text }),
            &token,
        )
        .await;
    }
    app.post(
        "/api/complain/add-complain",
        json!({ "complainCategory": category.id, "complain": "Not mine" }),
        &app.token_for(&other),
    )
    .await;

    let response = app.get("/api/complain/my-complains", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["complain"], "Second issue");
    assert_eq!(rows[0]["status"], "Opened");
    assert_eq!(rows[0]["categoryEnglish"], "Vehicle");
    assert!(rows[0]["reply"].is_null());
}
