//! Tender Pricing
//!
//! Line-item discount calculation for order and tender items tables: percent and
//! amount-per-unit discounts kept consistent with each other, line and order totals at
//! 4-decimal precision, and grouped number parsing and formatting for display.

pub mod discounts;
pub mod envelope;
pub mod fixtures;
pub mod items;
pub mod numbers;
pub mod payload;
pub mod precision;
pub mod prelude;
pub mod report;
pub mod table;
pub mod totals;
