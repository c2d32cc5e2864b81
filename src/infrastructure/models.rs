use std::str::FromStr;

use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use chrono::NaiveDate;
use diesel::prelude::*;
use thiserror::Error;

use crate::domain::order::LineItem;
use crate::schema::{line_items, orders};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: i32,
    pub order_date: NaiveDate,
    pub total: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: i32,
    pub order_date: NaiveDate,
    pub total: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = line_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LineItemRow {
    pub name: String,
    pub unit_price: String,
    pub quantity: i32,
    pub order_id: i32,
}

impl LineItemRow {
    pub fn into_line_item(self) -> Result<LineItem, ParseBigDecimalError> {
        Ok(LineItem {
            name: self.name,
            unit_price: parse_money(&self.unit_price)?,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = line_items)]
pub struct NewLineItemRow<'a> {
    pub name: &'a str,
    pub unit_price: String,
    pub quantity: i32,
    pub order_id: i32,
}

impl<'a> NewLineItemRow<'a> {
    pub fn new(order_id: i32, item: &'a LineItem) -> Result<Self, InexactMoney> {
        Ok(Self {
            name: &item.name,
            unit_price: money_text(&item.unit_price)?,
            quantity: item.quantity,
            order_id,
        })
    }
}

/// Significant digits a REAL keeps through SQLite's text conversion.
pub const MAX_REAL_DIGITS: usize = 15;

#[derive(Debug, Error)]
#[error("{0} cannot be stored exactly (integers must fit 64 bits, other values at most 15 significant digits)")]
pub struct InexactMoney(pub BigDecimal);

/// Text for a NUMERIC/MONEY column, provided SQLite will read it back unchanged.
///
/// Numeric affinity stores integer literals that fit an i64 as INTEGER and every
/// other number as REAL, which is read back with 15 significant digits.
pub fn money_text(value: &BigDecimal) -> Result<String, InexactMoney> {
    let exact = if value.is_integer() {
        value.to_i64().is_some()
    } else {
        let (digits, _) = value.normalized().as_bigint_and_exponent();
        digits.to_string().trim_start_matches('-').len() <= MAX_REAL_DIGITS
    };
    if exact {
        Ok(value.to_string())
    } else {
        Err(InexactMoney(value.clone()))
    }
}

pub fn parse_money(raw: &str) -> Result<BigDecimal, ParseBigDecimalError> {
    BigDecimal::from_str(raw.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_money_accepts_integer_and_fractional_text() {
        assert_eq!(parse_money("5300").expect("integer"), BigDecimal::from(5300));
        assert_eq!(
            parse_money("0.1").expect("fraction"),
            BigDecimal::from_str("0.1").expect("valid decimal")
        );
    }

    #[test]
    fn parse_money_rejects_garbage() {
        assert!(parse_money("five thousand").is_err());
    }

    fn decimal(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).expect("valid decimal")
    }

    #[test]
    fn money_text_accepts_values_sqlite_keeps_exactly() {
        assert_eq!(money_text(&decimal("5300")).expect("integer"), "5300");
        assert!(money_text(&decimal("9223372036854775807")).is_ok());
        assert!(money_text(&decimal("1234567890.12345")).is_ok());
        assert!(money_text(&decimal("-0.5")).is_ok());
    }

    #[test]
    fn money_text_rejects_values_that_would_be_rounded() {
        let err = money_text(&decimal("1234567890.123456789")).expect_err("19 digits");
        assert_eq!(err.0, decimal("1234567890.123456789"));
        assert!(money_text(&decimal("92233720368547758070")).is_err());
    }

    #[test]
    fn new_line_item_row_copies_item_fields() {
        let item = LineItem::new("laptop", 5300, 2);
        let row = NewLineItemRow::new(1, &item).expect("exact price");

        assert_eq!(row.name, "laptop");
        assert_eq!(row.unit_price, "5300");
        assert_eq!(row.quantity, 2);
        assert_eq!(row.order_id, 1);
    }
}
