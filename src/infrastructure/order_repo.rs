use diesel::prelude::*;

use crate::domain::errors::{Operation, RepositoryError};
use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;
use crate::schema::{line_items, orders};

use super::models::{money_text, parse_money, LineItemRow, NewLineItemRow, NewOrderRow, OrderRow};
use super::unit_of_work::UnitOfWork;

// ── Repository ────────────────────────────────────────────────────────────────

/// Order repository bound to one [`UnitOfWork`].
///
/// Every call runs inside the same transaction. Call [`complete`] once the
/// sequence succeeded, then [`close`] (or drop the repository) to commit;
/// without `complete` all writes are rolled back.
///
/// [`complete`]: DieselOrderRepository::complete
/// [`close`]: DieselOrderRepository::close
pub struct DieselOrderRepository {
    uow: UnitOfWork,
}

impl DieselOrderRepository {
    pub fn open(database_url: &str) -> Result<Self, RepositoryError> {
        Ok(Self {
            uow: UnitOfWork::open(database_url)?,
        })
    }

    /// Opens a repository, runs `work` against it and finalizes the scope.
    ///
    /// `work` decides the outcome by calling [`complete`]. If `work` fails, its
    /// error is returned and a failure to roll back is only logged.
    ///
    /// [`complete`]: DieselOrderRepository::complete
    pub fn scoped<T, F>(database_url: &str, work: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut Self) -> Result<T, RepositoryError>,
    {
        let mut repo = Self::open(database_url)?;
        match work(&mut repo) {
            Ok(value) => {
                repo.close()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(close_err) = repo.close() {
                    log::error!("{} while handling: {}", close_err, err);
                }
                Err(err)
            }
        }
    }

    pub fn complete(&mut self) {
        self.uow.mark_complete();
    }

    pub fn close(self) -> Result<(), RepositoryError> {
        self.uow.finish()
    }

    /// Deletes the items and then the header stored under `id`. Absent ids are
    /// a no-op.
    pub fn delete_by_id(&mut self, id: i32) -> Result<(), RepositoryError> {
        let conn = self.uow.connection();

        let items = diesel::delete(line_items::table.filter(line_items::order_id.eq(id)))
            .execute(conn)
            .map_err(|e| RepositoryError::persistence(Operation::Delete, id, e))?;
        let headers = diesel::delete(orders::table.filter(orders::id.eq(id)))
            .execute(conn)
            .map_err(|e| RepositoryError::persistence(Operation::Delete, id, e))?;

        log::debug!("Deleted order {} ({} headers, {} items)", id, headers, items);
        Ok(())
    }

    fn replace(&mut self, order: &Order) -> Result<(), RepositoryError> {
        if self.get_by_id(order.id())?.is_some() {
            self.delete(order)?;
        }
        self.add(order)
    }
}

impl OrderRepository for DieselOrderRepository {
    fn add(&mut self, order: &Order) -> Result<(), RepositoryError> {
        // Amounts SQLite would round are rejected before anything is written
        let item_rows = order
            .items()
            .iter()
            .map(|item| {
                NewLineItemRow::new(order.id(), item)
                    .map_err(|e| RepositoryError::item(order.id(), item, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total = money_text(&order.computed_total())
            .map_err(|e| RepositoryError::persistence(Operation::Add, order.id(), e))?;

        let conn = self.uow.connection();

        // 1. Header, with the total computed from the items being written
        diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                id: order.id(),
                order_date: order.order_date(),
                total,
            })
            .execute(conn)
            .map_err(|e| RepositoryError::persistence(Operation::Add, order.id(), e))?;

        // 2. One row per item; the composite key rejects duplicate names
        for (item, row) in order.items().iter().zip(&item_rows) {
            diesel::insert_into(line_items::table)
                .values(row)
                .execute(conn)
                .map_err(|e| RepositoryError::item(order.id(), item, e))?;
        }

        log::debug!("Added order {} with {} items", order.id(), order.items().len());
        Ok(())
    }

    fn get_by_id(&mut self, id: i32) -> Result<Option<Order>, RepositoryError> {
        let conn = self.uow.connection();

        let header = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(conn)
            .optional()
            .map_err(|e| RepositoryError::persistence(Operation::Read, id, e))?;

        let Some(header) = header else {
            return Ok(None);
        };

        let rows = line_items::table
            .filter(line_items::order_id.eq(header.id))
            .order(line_items::name.asc())
            .select(LineItemRow::as_select())
            .load(conn)
            .map_err(|e| RepositoryError::persistence(Operation::Read, id, e))?;

        let items = rows
            .into_iter()
            .map(LineItemRow::into_line_item)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RepositoryError::persistence(Operation::Read, id, e))?;
        let total = parse_money(&header.total)
            .map_err(|e| RepositoryError::persistence(Operation::Read, id, e))?;

        Ok(Some(Order::restore(header.id, header.order_date, total, items)))
    }

    fn update(&mut self, order: &Order) -> Result<(), RepositoryError> {
        self.replace(order)
            .map_err(|e| RepositoryError::persistence(Operation::Update, order.id(), e))
    }

    fn delete(&mut self, order: &Order) -> Result<(), RepositoryError> {
        self.delete_by_id(order.id())
    }
}
