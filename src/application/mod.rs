pub mod order_report;
pub mod statistics;
