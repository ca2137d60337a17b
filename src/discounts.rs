//! Discounts

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::precision::round4;

/// Which of the two discount fields is the source of truth for a line.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    /// Discount entered as a percentage of the unit price.
    #[default]
    Percent,

    /// Discount entered as a fixed amount per unit.
    Amount,
}

/// A discount as entered by the user: the mode together with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountInput {
    /// Percentage of the unit price, e.g. `15` for 15%.
    Percent(Decimal),

    /// Absolute discount per unit.
    Amount(Decimal),
}

impl DiscountInput {
    /// Pair a mode with the value entered for it.
    #[must_use]
    pub fn new(mode: DiscountMode, value: Decimal) -> Self {
        match mode {
            DiscountMode::Percent => DiscountInput::Percent(value),
            DiscountMode::Amount => DiscountInput::Amount(value),
        }
    }

    /// The mode this input was entered in.
    #[must_use]
    pub fn mode(&self) -> DiscountMode {
        match self {
            DiscountInput::Percent(_) => DiscountMode::Percent,
            DiscountInput::Amount(_) => DiscountMode::Amount,
        }
    }

    /// The entered value.
    #[must_use]
    pub fn value(&self) -> Decimal {
        match self {
            DiscountInput::Percent(value) | DiscountInput::Amount(value) => *value,
        }
    }
}

/// Every value derived for one line, always produced together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedLineValues {
    /// Unit price times quantity.
    pub line_total: Decimal,

    /// Discount applied to each unit.
    pub discount_per_unit: Decimal,

    /// Discount as a percentage of the unit price.
    pub discount_percent: Decimal,

    /// Discount as an amount per unit; equal to `discount_per_unit`.
    pub discount_amount_per_unit: Decimal,

    /// Discount per unit times quantity.
    pub total_discount_value: Decimal,

    /// Line total minus the total discount.
    pub value_after_discount: Decimal,
}

/// Derive the discount values for a single line.
///
/// An absent quantity counts as one unit. Whichever discount field was not entered is
/// computed from the other, so the percent and amount always agree. Every derived value is
/// rounded half away from zero to 4 decimal places.
///
/// This never fails: overflowing products saturate and a non-positive unit price derives a
/// zero percentage rather than dividing by it.
#[must_use]
pub fn calculate_discount(
    unit_price: Decimal,
    quantity: Option<Decimal>,
    input: DiscountInput,
) -> DerivedLineValues {
    let quantity = quantity.unwrap_or(Decimal::ONE);
    let line_total = round4(unit_price.saturating_mul(quantity));

    let (discount_per_unit, discount_percent) = match input {
        DiscountInput::Percent(percent) => (round4(percent_of(unit_price, percent)), percent),
        DiscountInput::Amount(amount) => (amount, percent_from_amount(unit_price, amount)),
    };

    let total_discount_value = round4(discount_per_unit.saturating_mul(quantity));
    let value_after_discount = round4(line_total.saturating_sub(total_discount_value));

    DerivedLineValues {
        line_total,
        discount_per_unit,
        discount_percent,
        discount_amount_per_unit: discount_per_unit,
        total_discount_value,
        value_after_discount,
    }
}

/// `percent`% of `price`, unrounded.
///
/// When `price * percent` overflows the percentage is scaled down first, so results that
/// fit in a [`Decimal`] are still exact.
fn percent_of(price: Decimal, percent: Decimal) -> Decimal {
    price
        .checked_mul(percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .or_else(|| {
            percent
                .checked_div(Decimal::ONE_HUNDRED)
                .map(|fraction| price.saturating_mul(fraction))
        })
        .unwrap_or(Decimal::ZERO)
}

/// The percentage of `price` that `amount` represents, rounded to 4 places.
fn percent_from_amount(price: Decimal, amount: Decimal) -> Decimal {
    if price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    amount
        .checked_div(price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, round4)
}
