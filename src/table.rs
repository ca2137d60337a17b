//! Items Table
//!
//! The ordered collection of line items behind an order or tender items table. Every
//! operation returns a new table; the table a caller holds is never changed underneath it.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    discounts::DerivedLineValues,
    items::{LineEdit, LineItem},
    payload::LineItemPayload,
    totals::{OrderTotals, aggregate_lines},
};

/// Errors related to table edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// No line exists at the given index.
    #[error("Line {0} not found")]
    LineNotFound(usize),
}

/// Items table
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsTable {
    lines: Vec<LineItem>,
    currency: &'static Currency,
}

impl ItemsTable {
    /// Create a new, empty table in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        ItemsTable {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a new table with the given lines.
    #[must_use]
    pub fn with_lines(lines: impl Into<Vec<LineItem>>, currency: &'static Currency) -> Self {
        ItemsTable {
            lines: lines.into(),
            currency,
        }
    }

    /// Append an empty line.
    #[must_use]
    pub fn add_row(&self) -> Self {
        let mut lines = self.lines.clone();
        lines.push(LineItem::new());

        trace!(rows = lines.len(), "added row");

        self.replaced(lines)
    }

    /// Apply a field edit to the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LineNotFound`] if `index` is out of range.
    pub fn edit(&self, index: usize, edit: LineEdit) -> Result<Self, TableError> {
        let line = self.line(index).ok_or(TableError::LineNotFound(index))?;

        debug!(index, ?edit, "editing line");

        let edited = line.apply(edit);

        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| if i == index { edited.clone() } else { line.clone() })
            .collect::<Vec<_>>();

        Ok(self.replaced(lines))
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LineNotFound`] if `index` is out of range.
    pub fn remove_row(&self, index: usize) -> Result<Self, TableError> {
        if index >= self.lines.len() {
            return Err(TableError::LineNotFound(index));
        }

        debug!(index, "removing line");

        let lines = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, line)| line.clone())
            .collect::<Vec<_>>();

        Ok(self.replaced(lines))
    }

    /// Get the line at `index`, if any.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.lines.get(index)
    }

    /// All lines, in table order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Derived values for every line, in table order.
    #[must_use]
    pub fn derived(&self) -> Vec<DerivedLineValues> {
        self.lines.iter().map(LineItem::derived).collect()
    }

    /// Totals across all current lines.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        aggregate_lines(&self.derived())
    }

    /// Request payloads for every line, in table order.
    #[must_use]
    pub fn payloads(&self) -> Vec<LineItemPayload> {
        self.lines.iter().map(LineItemPayload::from).collect()
    }

    /// Get the number of lines in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the table has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the table.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn replaced(&self, lines: Vec<LineItem>) -> Self {
        ItemsTable {
            lines,
            currency: self.currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::discounts::DiscountInput;

    fn test_lines() -> [LineItem; 2] {
        [
            LineItem::with_values(
                "Cement",
                dec!(100),
                Some(dec!(10)),
                DiscountInput::Percent(dec!(15)),
            ),
            LineItem::with_values(
                "Gravel",
                dec!(50),
                Some(dec!(4)),
                DiscountInput::Amount(dec!(5)),
            ),
        ]
    }

    #[test]
    fn new_with_currency() {
        let table = ItemsTable::new(iso::GBP);

        assert_eq!(table.currency(), iso::GBP);
        assert!(table.is_empty());
    }

    #[test]
    fn add_row_appends_empty_line() {
        let table = ItemsTable::with_lines(test_lines(), iso::GBP);
        let added = table.add_row();

        assert_eq!(table.len(), 2);
        assert_eq!(added.len(), 3);
        assert_eq!(added.line(2), Some(&LineItem::new()));
    }

    #[test]
    fn edit_recalculates_only_that_line() -> TestResult {
        let table = ItemsTable::with_lines(test_lines(), iso::GBP);
        let edited = table.edit(0, LineEdit::Quantity("20".to_string()))?;

        assert_eq!(edited.derived().first().map(|d| d.line_total), Some(dec!(2000)));
        assert_eq!(edited.line(1), table.line(1));
        assert_eq!(table.derived().first().map(|d| d.line_total), Some(dec!(1000)));

        Ok(())
    }

    #[test]
    fn edit_out_of_range_errors() {
        let table = ItemsTable::new(iso::GBP);

        assert_eq!(
            table.edit(0, LineEdit::UnitPrice("1".to_string())),
            Err(TableError::LineNotFound(0))
        );
    }

    #[test]
    fn remove_row_drops_line() -> TestResult {
        let table = ItemsTable::with_lines(test_lines(), iso::GBP);
        let removed = table.remove_row(0)?;

        assert_eq!(removed.len(), 1);
        assert_eq!(removed.line(0).map(LineItem::description), Some("Gravel"));
        assert_eq!(table.len(), 2);

        Ok(())
    }

    #[test]
    fn remove_row_out_of_range_errors() {
        let table = ItemsTable::with_lines(test_lines(), iso::GBP);

        assert_eq!(table.remove_row(2), Err(TableError::LineNotFound(2)));
    }

    #[test]
    fn totals_follow_collection_changes() -> TestResult {
        let table = ItemsTable::with_lines(test_lines(), iso::GBP);

        let totals = table.totals();
        assert_eq!(totals.total_value, dec!(1200));
        assert_eq!(totals.total_discount, dec!(170));
        assert_eq!(totals.final_value, dec!(1030));

        let totals = table.remove_row(1)?.totals();
        assert_eq!(totals.total_value, dec!(1000));
        assert_eq!(totals.final_value, dec!(850));

        let totals = table.add_row().totals();
        assert_eq!(totals.total_value, dec!(1200));

        let totals = ItemsTable::new(iso::GBP).totals();
        assert_eq!(totals.final_value, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn payloads_cover_every_line() {
        let table = ItemsTable::with_lines(test_lines(), iso::GBP);

        assert_eq!(table.payloads().len(), 2);
    }
}
