use bigdecimal::{BigDecimal, ToPrimitive};

use crate::domain::errors::RepositoryError;
use crate::domain::ports::OrderRepository;

use super::statistics::{describe, Summary};

/// Read-only reporting over stored orders. Only uses `get_by_id`.
pub struct OrderReport<R> {
    repo: R,
}

impl<R: OrderRepository> OrderReport<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    /// `unit_price × quantity` of every item of the order, in stored order.
    pub fn line_amounts(&mut self, order_id: i32) -> Result<Option<Vec<f64>>, RepositoryError> {
        let order = self.repo.get_by_id(order_id)?;
        Ok(order.map(|o| o.items().iter().map(|item| to_f64(&item.amount())).collect()))
    }

    /// Stored totals of those `ids` that exist.
    pub fn totals(&mut self, ids: &[i32]) -> Result<Vec<f64>, RepositoryError> {
        let mut totals = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(order) = self.repo.get_by_id(id)? {
                totals.push(to_f64(order.total()));
            }
        }
        Ok(totals)
    }

    pub fn summarize_lines(&mut self, order_id: i32) -> Result<Option<Summary>, RepositoryError> {
        Ok(self
            .line_amounts(order_id)?
            .and_then(|amounts| describe(&amounts)))
    }

    pub fn summarize_totals(&mut self, ids: &[i32]) -> Result<Option<Summary>, RepositoryError> {
        Ok(describe(&self.totals(ids)?))
    }
}

/// Unrepresentable amounts become `NaN`, which carries into every moment.
fn to_f64(value: &BigDecimal) -> f64 {
    match value.to_f64().filter(|v| v.is_finite()) {
        Some(v) => v,
        None => {
            log::warn!("Amount {} does not fit an f64, statistics will be NaN", value);
            f64::NAN
        }
    }
}
