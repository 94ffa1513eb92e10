//! Seed data script - populates the database with demo data for the driver app
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 2 approved drivers and 1 distribution officer in the same centre
//! - hold and return reasons
//! - the Transport application with complaint categories
//! - 6 market orders with invoice numbers ready to scan

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::time::Duration as StdDuration;
use tracing::info;

use transporter_api::{
    auth::{AuthConfig, AuthService},
    entities::{
        collection_officer, complain_category, hold_reason, market_order, process_order,
        return_reason, system_application, vehicle_registration,
    },
};

const DEMO_PASSWORD: &str = "driver123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== Transporter API Seed Data ===");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://transporter.db?mode=rwc".to_string());

    let mut options = ConnectOptions::new(database_url.clone());
    options
        .max_connections(5)
        .min_connections(1)
        .connect_timeout(StdDuration::from_secs(10))
        .acquire_timeout(StdDuration::from_secs(10));

    info!("Connecting to database: {}", database_url);
    let db = Database::connect(options).await?;
    transporter_api::db::run_migrations(&db).await?;

    let auth = AuthService::new(AuthConfig::new(
        "seed_data_only_secret_value_for_hashing_passwords".into(),
        StdDuration::from_secs(3600),
        10,
    ));
    let password = auth.hash_password(DEMO_PASSWORD).await?;

    info!("Creating officers...");
    let drivers = create_officers(&db, &password).await?;
    info!("  Created {} drivers", drivers.len());

    info!("Creating reasons...");
    let reasons = create_reasons(&db).await?;
    info!("  Created {} hold and return reasons", reasons);

    info!("Creating complaint categories...");
    let categories = create_complaint_categories(&db).await?;
    info!("  Created {} categories", categories);

    info!("Creating orders...");
    let invoices = create_orders(&db).await?;
    info!("  Created {} orders", invoices.len());

    info!("=== Seed Data Complete ===");
    info!("Log in with DRV00001 / {}", DEMO_PASSWORD);
    info!("Scan one of: {}", invoices.join(", "));

    Ok(())
}

async fn create_officers(db: &DatabaseConnection, password: &str) -> anyhow::Result<Vec<i32>> {
    let people = [
        ("DRV00001", "Nimal", "Perera", collection_officer::JOB_ROLE_DRIVER),
        ("DRV00002", "Kamala", "Silva", collection_officer::JOB_ROLE_DRIVER),
        ("DIO00001", "Sunil", "Fernando", "Distribution Officer"),
    ];

    let mut drivers = Vec::new();
    for (emp_id, first, last, role) in people {
        let officer = collection_officer::ActiveModel {
            emp_id: Set(emp_id.to_string()),
            first_name_english: Set(first.to_string()),
            last_name_english: Set(last.to_string()),
            phone_code01: Set(Some("+94".to_string())),
            phone_number01: Set(Some("771234567".to_string())),
            job_role: Set(role.to_string()),
            status: Set(collection_officer::STATUS_APPROVED.to_string()),
            password: Set(password.to_string()),
            password_updated: Set(false),
            distributed_center_id: Set(Some(1)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        if role == collection_officer::JOB_ROLE_DRIVER {
            vehicle_registration::ActiveModel {
                co_id: Set(officer.id),
                v_type: Set("Lorry".to_string()),
                v_reg_no: Set(format!("WP-{}", 1000 + officer.id)),
                ..Default::default()
            }
            .insert(db)
            .await?;
            drivers.push(officer.id);
        }
    }
    Ok(drivers)
}

async fn create_reasons(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let hold = ["Customer not available", "Address not found", "Vehicle breakdown"];
    let returns = ["Customer rejected the order", "Damaged items", "Wrong items"];
    let now = Utc::now();

    for (idx, reason) in hold.iter().enumerate() {
        hold_reason::ActiveModel {
            index_no: Set(idx as i32 + 1),
            rsn_english: Set(reason.to_string()),
            rsn_sinhala: Set(String::new()),
            rsn_tamil: Set(String::new()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    for (idx, reason) in returns.iter().enumerate() {
        return_reason::ActiveModel {
            index_no: Set(idx as i32 + 1),
            rsn_english: Set(reason.to_string()),
            rsn_sinhala: Set(String::new()),
            rsn_tamil: Set(String::new()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(hold.len() + returns.len())
}

async fn create_complaint_categories(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let app = system_application::ActiveModel {
        app_name: Set("Transport".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let categories = ["Vehicle", "Payment", "Customer", "Other"];
    for name in categories {
        complain_category::ActiveModel {
            app_id: Set(app.id),
            category_english: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(categories.len())
}

async fn create_orders(db: &DatabaseConnection) -> anyhow::Result<Vec<String>> {
    let orders: [(&str, &str, Decimal); 6] = [
        ("Saman Kumara", "Cash", dec!(2450.00)),
        ("Ruwan Jayasinghe", "Card", dec!(1800.50)),
        ("Dilani Wickrama", "Cash", dec!(990.00)),
        ("Priya Nadarajah", "Cash", dec!(3120.25)),
        ("Ashan Bandara", "Card", dec!(560.00)),
        ("Fathima Rizvi", "Cash", dec!(1275.75)),
    ];
    let now = Utc::now();

    let mut invoices = Vec::new();
    for (idx, (name, payment, total)) in orders.into_iter().enumerate() {
        let market = market_order::ActiveModel {
            title: Set(Some("Mr/Ms".to_string())),
            full_name: Set(Some(name.to_string())),
            phone_code1: Set(Some("+94".to_string())),
            phone1: Set(Some(format!("7700000{:02}", idx))),
            house_no: Set(Some(format!("{}", 10 + idx))),
            street_name: Set(Some("Galle Road".to_string())),
            city: Set(Some("Colombo".to_string())),
            full_total: Set(total),
            delivery_type: Set(Some("Delivery".to_string())),
            schedule_date: Set(Some((now + Duration::days(1)).date_naive())),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let inv_no = format!("INV{}{:04}", now.format("%y%m%d"), idx + 1);
        process_order::ActiveModel {
            order_id: Set(market.id),
            inv_no: Set(inv_no.clone()),
            payment_method: Set(payment.to_string()),
            amount: Set(total),
            is_paid: Set(false),
            status: Set("Processing".to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
        invoices.push(inv_no);
    }
    Ok(invoices)
}
