//! Tender Pricing prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{DerivedLineValues, DiscountInput, DiscountMode, calculate_discount},
    envelope::{ApiResponse, EnvelopeError, decode_envelope},
    fixtures::{FixtureError, OrderSheet},
    items::{LineEdit, LineItem},
    numbers::{format_input, format_number, format_optional, parse_number, parse_optional_number},
    payload::LineItemPayload,
    precision::round4,
    report::{ReportError, write_report},
    table::{ItemsTable, TableError},
    totals::{OrderTotals, aggregate_lines},
};
