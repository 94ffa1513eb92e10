// Driver accounts
pub mod accounts;

// Order assignment and status transitions
pub mod order_status;
pub mod orders;

// Exception flows
pub mod holds;
pub mod returns;

// Cash reconciliation and dashboard totals
pub mod cash;

// Support
pub mod complaints;
