//! Request Payloads
//!
//! The request body shape the backend expects for a saved line item.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{discounts::DiscountMode, items::LineItem, precision::fixed4};

/// A line item as submitted to the backend.
///
/// Decimals are written as strings with exactly four fractional digits, so the submitted
/// values match what the table displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemPayload {
    /// Item description
    pub description: String,

    /// Quantity (one when none was entered)
    #[serde(with = "rust_decimal::serde::str")]
    pub item_quantity: Decimal,

    /// Price of one unit before discount
    #[serde(with = "rust_decimal::serde::str")]
    pub item_unit_price: Decimal,

    /// Which discount field was entered
    pub discount_type: DiscountMode,

    /// Discount percentage
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percent: Decimal,

    /// Discount amount per unit
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_amount: Decimal,

    /// Total discount for the line
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,

    /// Line value after discount
    #[serde(with = "rust_decimal::serde::str")]
    pub item_total_value: Decimal,
}

impl From<&LineItem> for LineItemPayload {
    fn from(line: &LineItem) -> Self {
        let derived = line.derived();

        LineItemPayload {
            description: line.description().to_string(),
            item_quantity: fixed4(line.quantity().unwrap_or(Decimal::ONE)),
            item_unit_price: fixed4(line.unit_price()),
            discount_type: line.discount_mode(),
            discount_percent: fixed4(derived.discount_percent),
            discount_amount: fixed4(derived.discount_amount_per_unit),
            discount_value: fixed4(derived.total_discount_value),
            item_total_value: fixed4(derived.value_after_discount),
        }
    }
}
