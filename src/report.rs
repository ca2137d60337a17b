//! Report
//!
//! Text rendering of an items table: one row per line followed by a totals summary.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    discounts::DiscountMode, numbers::format_number, table::ItemsTable, totals::OrderTotals,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Writes the report for `table` to `out`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if writing fails.
pub fn write_report(
    mut out: impl io::Write,
    table: &ItemsTable,
    title: Option<&str>,
) -> Result<(), ReportError> {
    if let Some(title) = title {
        writeln!(out, "\n{title}")?;
    }

    let mut builder = Builder::default();

    push_header(&mut builder);
    append_line_rows(&mut builder, table);

    let mut rendered = builder.build();

    rendered.with(Style::modern_rounded());
    rendered.modify(Rows::first(), Color::BOLD);
    rendered.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "\n{rendered}")?;

    write_summary(&mut out, &table.totals(), table.currency())?;

    Ok(())
}

fn push_header(builder: &mut Builder) {
    builder.push_record([
        "",
        "Item",
        "Qty",
        "Unit Price",
        "Discount %",
        "Discount/Unit",
        "Line Total",
        "Discount",
        "After Discount",
    ]);
}

fn append_line_rows(builder: &mut Builder, table: &ItemsTable) {
    for (idx, line) in table.lines().iter().enumerate() {
        let derived = line.derived();

        // The entered field is marked so derived values read as derived.
        let (percent_marker, amount_marker) = match line.discount_mode() {
            DiscountMode::Percent => ("*", ""),
            DiscountMode::Amount => ("", "*"),
        };

        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.description().to_string(),
            line.quantity().map_or_else(|| "1".to_string(), format_number),
            format_number(line.unit_price()),
            format!("{}{percent_marker}", format_number(derived.discount_percent)),
            format!(
                "{}{amount_marker}",
                format_number(derived.discount_amount_per_unit)
            ),
            format_number(derived.line_total),
            format_number(derived.total_discount_value),
            format_number(derived.value_after_discount),
        ]);
    }
}

fn write_summary(
    out: &mut impl io::Write,
    totals: &OrderTotals,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    let share = percent_points_from_fractional_percentage(totals.discount_share());

    let total_val = format!("{}", Money::from_decimal(totals.total_value, currency));
    let discount_val = format!(
        "({share:.2}%) {}",
        Money::from_decimal(totals.total_discount, currency)
    );
    let final_val = format!("{}", Money::from_decimal(totals.final_value, currency));

    let value_width = total_val
        .len()
        .max(discount_val.len())
        .max(final_val.len());

    writeln!(out, " Total value:  {total_val:>value_width$}")?;
    writeln!(out, " Discount:     {discount_val:>value_width$}")?;
    writeln!(out, " Final value:  {final_val:>value_width$}")?;
    writeln!(out)?;

    Ok(())
}

/// Converts a fractional percentage to percent points for display.
fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}
