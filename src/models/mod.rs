pub mod business_day;
pub mod order_status;

pub use order_status::{DriverOrderStatus, ProcessOrderStatus};
