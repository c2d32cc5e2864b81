pub mod models;
pub mod order_repo;
pub mod unit_of_work;
