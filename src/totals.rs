//! Totals

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::{discounts::DerivedLineValues, precision::round4};

/// Order-level (or tender-level) totals across every line of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of line totals before discount.
    pub total_value: Decimal,

    /// Sum of line discount values.
    pub total_discount: Decimal,

    /// Total value minus total discount.
    pub final_value: Decimal,
}

impl OrderTotals {
    /// The total discount as a fraction of the total value.
    ///
    /// Zero when the total value is zero.
    #[must_use]
    pub fn discount_share(&self) -> Percentage {
        if self.total_value.is_zero() {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(
            self.total_discount
                .checked_div(self.total_value)
                .unwrap_or(Decimal::ZERO),
        )
    }
}

/// Sum derived line values into order totals.
///
/// Recomputed from scratch on every call; the result does not depend on line order.
#[must_use]
pub fn aggregate_lines(lines: &[DerivedLineValues]) -> OrderTotals {
    let (total_value, total_discount) = lines.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(value, discount), line| {
            (
                value.saturating_add(line.line_total),
                discount.saturating_add(line.total_discount_value),
            )
        },
    );

    let total_value = round4(total_value);
    let total_discount = round4(total_discount);

    OrderTotals {
        total_value,
        total_discount,
        final_value: round4(total_value.saturating_sub(total_discount)),
    }
}
