use super::errors::RepositoryError;
use super::order::Order;

/// Aggregate repository over [`Order`]. All calls of one instance share a
/// single transaction.
pub trait OrderRepository {
    fn add(&mut self, order: &Order) -> Result<(), RepositoryError>;
    fn get_by_id(&mut self, id: i32) -> Result<Option<Order>, RepositoryError>;
    fn update(&mut self, order: &Order) -> Result<(), RepositoryError>;
    fn delete(&mut self, order: &Order) -> Result<(), RepositoryError>;
}
