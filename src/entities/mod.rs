//! sea-orm entities for the driver tables and the upstream tables they read.
//!
//! In production the tables live in the `collection_officer`, `market_place` and
//! `agro_world_admin` schemas and are resolved through the connection search_path.

pub mod collection_officer;
pub mod complain_category;
pub mod driver_complain;
pub mod driver_hold_order;
pub mod driver_order;
pub mod driver_return_order;
pub mod hold_reason;
pub mod market_order;
pub mod process_order;
pub mod return_reason;
pub mod system_application;
pub mod vehicle_registration;
