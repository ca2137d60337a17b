//! Tender pricing command line

use std::{
    io::{self, Write},
    process,
};

use anyhow::Result;
use tracing::{debug, info};

use tender_pricing::{
    discounts::DiscountMode,
    fixtures::OrderSheet,
    items::{LineEdit, LineItem},
    numbers::format_number,
    payload::LineItemPayload,
    report::write_report,
    table::ItemsTable,
};

use crate::config::{CalcArgs, Command, Config};

mod config;
mod observability;

/// Tender pricing entry point
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        // Help and version requests also arrive here as errors.
        e.exit();
    });

    if let Err(e) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Report { file } => {
            let sheet = OrderSheet::load(&file)?;
            let table = sheet.table()?;

            info!(file = %file.display(), lines = table.len(), "rendering report");

            write_report(&mut out, &table, sheet.title.as_deref())?;
        }
        Command::Payload { file } => {
            let table = OrderSheet::load(&file)?.table()?;

            write_payloads(&mut out, &table)?;
        }
        Command::Calc(args) => write_calculation(&mut out, &args)?,
    }

    Ok(())
}

fn write_payloads(out: &mut impl Write, table: &ItemsTable) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &table.payloads())?;
    writeln!(out)?;

    Ok(())
}

fn write_calculation(out: &mut impl Write, args: &CalcArgs) -> Result<()> {
    let mut line = LineItem::new().apply(LineEdit::UnitPrice(args.unit_price.clone()));

    if let Some(quantity) = &args.quantity {
        line = line.apply(LineEdit::Quantity(quantity.clone()));
    }

    line = line.apply(match args.mode {
        DiscountMode::Percent => LineEdit::DiscountPercent(args.discount.clone()),
        DiscountMode::Amount => LineEdit::DiscountAmount(args.discount.clone()),
    });

    debug!(?line, "calculated line");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &LineItemPayload::from(&line))?;
        writeln!(out)?;

        return Ok(());
    }

    let derived = line.derived();

    let rows = [
        ("Line total", derived.line_total),
        ("Discount %", derived.discount_percent),
        ("Discount per unit", derived.discount_per_unit),
        ("Total discount", derived.total_discount_value),
        ("Value after discount", derived.value_after_discount),
    ];

    for (label, value) in rows {
        writeln!(out, "{label:>20}  {}", format_number(value))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso;
    use serde_json::{Value, json};
    use tender_pricing::discounts::DiscountInput;
    use testresult::TestResult;

    use super::*;

    fn calc_args(mode: DiscountMode, discount: &str, json: bool) -> CalcArgs {
        CalcArgs {
            unit_price: "1,000".to_string(),
            quantity: Some("2".to_string()),
            mode,
            discount: discount.to_string(),
            json,
        }
    }

    #[test]
    fn calculation_prints_labelled_values() -> TestResult {
        let mut out = Vec::new();

        write_calculation(&mut out, &calc_args(DiscountMode::Percent, "10", false))?;

        let output = String::from_utf8(out)?;
        let rows = output.lines().map(str::trim).collect::<Vec<_>>();

        assert_eq!(
            rows,
            [
                "Line total  2,000",
                "Discount %  10",
                "Discount per unit  100",
                "Total discount  200",
                "Value after discount  1,800",
            ]
        );

        Ok(())
    }

    #[test]
    fn calculation_json_matches_payload() -> TestResult {
        let mut out = Vec::new();

        write_calculation(&mut out, &calc_args(DiscountMode::Amount, "250", true))?;

        let value: Value = serde_json::from_slice(&out)?;

        assert_eq!(value["discount_type"], json!("amount"));
        assert_eq!(value["discount_percent"], json!("25.0000"));
        assert_eq!(value["discount_value"], json!("500.0000"));
        assert_eq!(value["item_total_value"], json!("1500.0000"));

        Ok(())
    }

    #[test]
    fn payloads_print_one_entry_per_line() -> TestResult {
        let table = ItemsTable::with_lines(
            [
                LineItem::with_values(
                    "Cement",
                    dec!(100),
                    Some(dec!(10)),
                    DiscountInput::Percent(dec!(15)),
                ),
                LineItem::new(),
            ],
            iso::GBP,
        );
        let mut out = Vec::new();

        write_payloads(&mut out, &table)?;

        let value: Value = serde_json::from_slice(&out)?;
        let entries = value.as_array().ok_or("expected a JSON array")?;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["item_total_value"], json!("850.0000"));
        assert_eq!(entries[1]["item_quantity"], json!("1.0000"));
        assert!(out.ends_with(b"\n"));

        Ok(())
    }
}
