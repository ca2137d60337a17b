//! Precision

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits every derived value is rounded to.
pub const SCALE: u32 = 4;

/// Round a value to [`SCALE`] decimal places, midpoint away from zero.
///
/// Equivalent to `round(x * 10000) / 10000` with half-away-from-zero rounding.
#[must_use]
pub fn round4(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a value to [`SCALE`] decimal places and pad it to exactly that scale.
///
/// Used for serialized output so `150` is written as `150.0000`.
#[must_use]
pub fn fixed4(value: Decimal) -> Decimal {
    let mut fixed = round4(value);
    fixed.rescale(SCALE);

    fixed
}
