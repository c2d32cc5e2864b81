pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod infrastructure;
pub mod schema;

pub use config::Config;
pub use db::{establish, provision_schema, SchemaError, MIGRATIONS};
pub use domain::errors::{Finalize, Operation, RepositoryError};
pub use domain::order::{LineItem, Order};
pub use domain::ports::OrderRepository;
pub use infrastructure::order_repo::DieselOrderRepository;
pub use infrastructure::unit_of_work::UnitOfWork;
