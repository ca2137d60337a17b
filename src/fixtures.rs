//! Order Sheets
//!
//! Items tables described in YAML (or wrapped in a JSON response envelope), with numeric
//! fields written exactly as a user would type them.

use std::{fs, path::Path};

use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    discounts::DiscountMode,
    envelope::{EnvelopeError, decode_envelope},
    items::{LineEdit, LineItem},
    table::ItemsTable,
};

/// Order sheet loading errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading the sheet file
    #[error("Failed to read order sheet: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// JSON envelope error
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Discount as written in a sheet
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountFixture {
    /// Which field the value is for
    pub mode: DiscountMode,

    /// Typed discount value
    pub value: String,
}

/// One line as written in a sheet
#[derive(Debug, Clone, Deserialize)]
pub struct LineFixture {
    /// Item description
    #[serde(default)]
    pub description: String,

    /// Typed unit price
    #[serde(default)]
    pub unit_price: String,

    /// Typed quantity; omitted means not yet entered
    #[serde(default)]
    pub quantity: Option<String>,

    /// Discount, if any
    #[serde(default)]
    pub discount: Option<DiscountFixture>,
}

impl LineFixture {
    /// Build the line by replaying the fields as edits on an empty row.
    #[must_use]
    pub fn to_line_item(&self) -> LineItem {
        let mut line = LineItem::new()
            .apply(LineEdit::Description(self.description.clone()))
            .apply(LineEdit::UnitPrice(self.unit_price.clone()));

        if let Some(quantity) = &self.quantity {
            line = line.apply(LineEdit::Quantity(quantity.clone()));
        }

        if let Some(discount) = &self.discount {
            let edit = match discount.mode {
                DiscountMode::Percent => LineEdit::DiscountPercent(discount.value.clone()),
                DiscountMode::Amount => LineEdit::DiscountAmount(discount.value.clone()),
            };

            line = line.apply(edit);
        }

        line
    }
}

/// An order or tender items table as written in a sheet
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSheet {
    /// Sheet title, shown above the report
    #[serde(default)]
    pub title: Option<String>,

    /// ISO 4217 currency code
    pub currency: String,

    /// Lines, in table order
    #[serde(default)]
    pub lines: Vec<LineFixture>,
}

impl OrderSheet {
    /// Parse a sheet from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the YAML does not describe a sheet.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Parse a sheet from a JSON response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Envelope`] if the body is malformed or an error envelope.
    pub fn from_json_envelope(body: &str) -> Result<Self, FixtureError> {
        Ok(decode_envelope(body)?)
    }

    /// Load a sheet from disk. Files ending in `.json` are read as response envelopes,
    /// anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let sheet = if is_json {
            Self::from_json_envelope(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };

        debug!(path = %path.display(), lines = sheet.lines.len(), "loaded order sheet");

        Ok(sheet)
    }

    /// Resolve the sheet currency.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownCurrency`] if the code is not an ISO currency.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        iso::find(self.currency.trim())
            .ok_or_else(|| FixtureError::UnknownCurrency(self.currency.clone()))
    }

    /// Build the items table described by this sheet.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownCurrency`] if the sheet currency is not recognised.
    pub fn table(&self) -> Result<ItemsTable, FixtureError> {
        let lines = self
            .lines
            .iter()
            .map(LineFixture::to_line_item)
            .collect::<Vec<_>>();

        Ok(ItemsTable::with_lines(lines, self.currency()?))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    const SHEET: &str = r#"
title: Tender 2024/117
currency: GBP
lines:
  - description: Portland cement
    unit_price: "1,250.50"
    quantity: "10"
    discount:
      mode: percent
      value: "15"
  - description: Rebar
    unit_price: "50"
    quantity: "4"
    discount:
      mode: amount
      value: "5"
  - description: Site survey
    unit_price: "800"
"#;

    #[test]
    fn parses_yaml_sheet() -> TestResult {
        let sheet = OrderSheet::from_yaml(SHEET)?;

        assert_eq!(sheet.title.as_deref(), Some("Tender 2024/117"));
        assert_eq!(sheet.lines.len(), 3);

        Ok(())
    }

    #[test]
    fn builds_table_from_typed_text() -> TestResult {
        let table = OrderSheet::from_yaml(SHEET)?.table()?;

        assert_eq!(table.currency(), iso::GBP);
        assert_eq!(table.len(), 3);

        let cement = table.line(0).ok_or("missing cement line")?;
        assert_eq!(cement.unit_price(), dec!(1250.50));
        assert_eq!(cement.discount_amount_per_unit(), dec!(187.575));

        let rebar = table.line(1).ok_or("missing rebar line")?;
        assert_eq!(rebar.discount_mode(), DiscountMode::Amount);
        assert_eq!(rebar.discount_percent(), dec!(10));

        let survey = table.line(2).ok_or("missing survey line")?;
        assert_eq!(survey.quantity(), None);
        assert_eq!(survey.derived().line_total, dec!(800));

        Ok(())
    }

    #[test]
    fn unknown_currency_errors() -> TestResult {
        let sheet = OrderSheet::from_yaml("currency: XYZ\nlines: []\n")?;

        assert!(matches!(
            sheet.table(),
            Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"
        ));

        Ok(())
    }

    #[test]
    fn parses_json_envelope() -> TestResult {
        let body = r#"{
            "status": "ok",
            "data": {
                "currency": "EUR",
                "lines": [{ "description": "Pipe", "unit_price": "12.5", "quantity": "8" }]
            }
        }"#;

        let table = OrderSheet::from_json_envelope(body)?.table()?;

        assert_eq!(table.currency(), iso::EUR);
        assert_eq!(table.totals().total_value, dec!(100));

        Ok(())
    }

    #[test]
    fn rejected_envelope_surfaces_reason() {
        let body = r#"{"status":"error","message":"order not found"}"#;

        assert!(matches!(
            OrderSheet::from_json_envelope(body),
            Err(FixtureError::Envelope(EnvelopeError::Rejected { .. }))
        ));
    }
}
