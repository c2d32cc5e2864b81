use std::fmt;

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::Serialize;

/// A single priced line of an order. Identified by `name` within its order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: impl Into<BigDecimal>, quantity: i32) -> Self {
        Self {
            name: name.into(),
            unit_price: unit_price.into(),
            quantity,
        }
    }

    /// `unit_price × quantity`.
    pub fn amount(&self) -> BigDecimal {
        self.unit_price.clone() * BigDecimal::from(self.quantity)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} @ {}", self.name, self.quantity, self.unit_price)
    }
}

/// Order aggregate root: a header plus the line items it owns.
///
/// `total` is derived. Orders built with [`Order::new`] carry the sum of their
/// item amounts; orders read back from storage carry whatever total was stored
/// at write time, see [`Order::computed_total`] for the recomputed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Order {
    id: i32,
    order_date: NaiveDate,
    total: BigDecimal,
    items: Vec<LineItem>,
}

impl Order {
    pub fn new(id: i32, order_date: NaiveDate, items: Vec<LineItem>) -> Self {
        let total = sum_amounts(&items);
        Self {
            id,
            order_date,
            total,
            items,
        }
    }

    /// An order with no items, e.g. to address a stored order by id only.
    pub fn with_id(id: i32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Rebuilds an order from stored values without recomputing the total.
    pub(crate) fn restore(
        id: i32,
        order_date: NaiveDate,
        total: BigDecimal,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            id,
            order_date,
            total,
            items,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn total(&self) -> &BigDecimal {
        &self.total
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of `unit_price × quantity` over the current items.
    pub fn computed_total(&self) -> BigDecimal {
        sum_amounts(&self.items)
    }
}

fn sum_amounts(items: &[LineItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + item.amount())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 1, 13).expect("valid date")
    }

    #[test]
    fn new_order_total_is_sum_of_item_amounts() {
        let order = Order::new(
            1,
            date(),
            vec![
                LineItem::new("komputer", 5000, 4),
                LineItem::new("laptop", 5300, 2),
            ],
        );

        assert_eq!(order.total(), &BigDecimal::from(30600));
        assert_eq!(order.computed_total(), BigDecimal::from(30600));
    }

    #[test]
    fn order_without_items_has_zero_total() {
        let order = Order::new(7, date(), Vec::new());

        assert!(order.items().is_empty());
        assert!(order.total().is_zero());
    }

    #[test]
    fn with_id_defaults_to_empty_items() {
        let first = Order::with_id(4);
        let second = Order::with_id(5);

        assert_eq!(first.id(), 4);
        assert!(first.items().is_empty());
        assert!(second.items().is_empty());
        assert!(first.total().is_zero());
    }

    #[test]
    fn restored_total_is_kept_as_given() {
        let order = Order::restore(
            1,
            date(),
            BigDecimal::from(3000),
            vec![LineItem::new("komputer", 5000, 4)],
        );

        assert_eq!(order.total(), &BigDecimal::from(3000));
        assert_eq!(order.computed_total(), BigDecimal::from(20000));
    }

    #[test]
    fn line_item_amount_handles_fractional_prices() {
        let price: BigDecimal = "19.99".parse().expect("valid decimal");
        let item = LineItem::new("cable", price, 3);

        assert_eq!(item.amount(), "59.97".parse::<BigDecimal>().expect("valid decimal"));
    }

    #[test]
    fn line_item_display() {
        let item = LineItem::new("tablet", 300, 1);
        assert_eq!(item.to_string(), "tablet x1 @ 300");
    }
}
