pub mod auth;
pub mod common;
pub mod complaints;
pub mod health;
pub mod holds;
pub mod home;
pub mod orders;
pub mod returns;

use crate::{
    auth::AuthService,
    config::AppConfig,
    db::DbPool,
    services::{
        accounts::AccountService, cash::CashService, complaints::ComplaintService,
        holds::HoldService, order_status::OrderStatusService, orders::OrderService,
        returns::ReturnService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<AccountService>,
    pub orders: Arc<OrderService>,
    pub order_status: Arc<OrderStatusService>,
    pub holds: Arc<HoldService>,
    pub returns: Arc<ReturnService>,
    pub cash: Arc<CashService>,
    pub complaints: Arc<ComplaintService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, auth_service: Arc<AuthService>, cfg: &AppConfig) -> Self {
        let offset = cfg.business_offset();
        Self {
            accounts: Arc::new(AccountService::new(db_pool.clone(), auth_service)),
            orders: Arc::new(OrderService::new(
                db_pool.clone(),
                chrono::Duration::hours(cfg.hand_over_window_hours),
            )),
            order_status: Arc::new(OrderStatusService::new(db_pool.clone())),
            holds: Arc::new(HoldService::new(db_pool.clone())),
            returns: Arc::new(ReturnService::new(db_pool.clone())),
            cash: Arc::new(CashService::new(db_pool.clone(), offset)),
            complaints: Arc::new(ComplaintService::new(
                db_pool,
                offset,
                cfg.complain_app_name.clone(),
            )),
        }
    }
}
