//! Line Items

use rust_decimal::Decimal;

use crate::{
    discounts::{DerivedLineValues, DiscountInput, DiscountMode, calculate_discount},
    numbers::{parse_number, parse_optional_number},
};

/// A field-level edit to a line, carrying the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Replace the item description.
    Description(String),

    /// Unit price text; unparseable text reads as zero.
    UnitPrice(String),

    /// Quantity text; empty text clears the quantity.
    Quantity(String),

    /// Switch which discount field is the source of truth.
    Mode(DiscountMode),

    /// Discount percentage text. Makes percent the active mode.
    DiscountPercent(String),

    /// Discount amount per unit text. Makes amount the active mode.
    DiscountAmount(String),
}

/// One row of an items table.
///
/// Line items are values: applying an edit returns a new, fully recalculated line rather
/// than mutating the existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    description: String,
    unit_price: Decimal,
    quantity: Option<Decimal>,
    discount_mode: DiscountMode,
    discount_percent: Decimal,
    discount_amount_per_unit: Decimal,
}

impl LineItem {
    /// Creates an empty line, as added by a new table row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fully recalculated line from already-parsed values.
    #[must_use]
    pub fn with_values(
        description: impl Into<String>,
        unit_price: Decimal,
        quantity: Option<Decimal>,
        discount: DiscountInput,
    ) -> Self {
        let mut line = LineItem {
            description: description.into(),
            unit_price,
            quantity,
            discount_mode: discount.mode(),
            ..LineItem::default()
        };

        match discount {
            DiscountInput::Percent(percent) => line.discount_percent = percent,
            DiscountInput::Amount(amount) => line.discount_amount_per_unit = amount,
        }

        line.recalculated()
    }

    /// Apply an edit, returning the recalculated line.
    #[must_use]
    pub fn apply(&self, edit: LineEdit) -> Self {
        let mut line = self.clone();

        match edit {
            LineEdit::Description(description) => line.description = description,
            LineEdit::UnitPrice(text) => line.unit_price = parse_number(&text),
            LineEdit::Quantity(text) => line.quantity = parse_optional_number(&text),
            LineEdit::Mode(mode) => line.discount_mode = mode,
            LineEdit::DiscountPercent(text) => {
                line.discount_mode = DiscountMode::Percent;
                line.discount_percent = parse_number(&text);
            }
            LineEdit::DiscountAmount(text) => {
                line.discount_mode = DiscountMode::Amount;
                line.discount_amount_per_unit = parse_number(&text);
            }
        }

        line.recalculated()
    }

    /// Item description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price of one unit before discount
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Quantity, if one has been entered
    #[must_use]
    pub fn quantity(&self) -> Option<Decimal> {
        self.quantity
    }

    /// Active discount mode
    #[must_use]
    pub fn discount_mode(&self) -> DiscountMode {
        self.discount_mode
    }

    /// Discount percentage, entered or derived
    #[must_use]
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Discount amount per unit, entered or derived
    #[must_use]
    pub fn discount_amount_per_unit(&self) -> Decimal {
        self.discount_amount_per_unit
    }

    /// The discount as entered in the active mode.
    #[must_use]
    pub fn discount_input(&self) -> DiscountInput {
        match self.discount_mode {
            DiscountMode::Percent => DiscountInput::Percent(self.discount_percent),
            DiscountMode::Amount => DiscountInput::Amount(self.discount_amount_per_unit),
        }
    }

    /// Derive the line's totals from its current fields.
    #[must_use]
    pub fn derived(&self) -> DerivedLineValues {
        calculate_discount(self.unit_price, self.quantity, self.discount_input())
    }

    /// Overwrite the inactive discount field with the value derived from the active one.
    fn recalculated(mut self) -> Self {
        let derived = self.derived();

        self.discount_percent = derived.discount_percent;
        self.discount_amount_per_unit = derived.discount_amount_per_unit;

        self
    }
}
