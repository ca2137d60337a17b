//! Numbers
//!
//! Parsing of user-typed, comma-grouped decimal text and formatting of decimals back into
//! grouped display text. Nothing in here fails: text that cannot be read as a number is
//! treated as absent (or zero), and stray characters are dropped.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::precision::{SCALE, round4};

/// Clean raw input down to digits and at most one decimal point.
///
/// Every character other than an ASCII digit or the first `.` is dropped, and fractional
/// digits beyond [`SCALE`] are truncated (not rounded). An in-progress trailing `.` is kept.
#[must_use]
pub fn sanitize_input(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut seen_point = false;
    let mut fraction_digits = 0u32;

    for ch in text.chars() {
        match ch {
            '0'..='9' if !seen_point => out.push(ch),
            '0'..='9' => {
                if fraction_digits < SCALE {
                    out.push(ch);
                    fraction_digits += 1;
                }
            }
            '.' if !seen_point => {
                seen_point = true;
                out.push(ch);
            }
            _ => {}
        }
    }

    out
}

/// Parse typed text into a decimal, distinguishing absent input from zero.
///
/// Returns `None` when no digits remain after [`sanitize_input`] or when the digits do not
/// fit in a [`Decimal`].
#[must_use]
pub fn parse_optional_number(text: &str) -> Option<Decimal> {
    let cleaned = sanitize_input(text);
    let (int_part, frac_part) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };

    let literal = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    };

    Decimal::from_str(&literal).ok()
}

/// Parse typed text into a decimal, reading anything unparseable as zero.
///
/// Fractional digits beyond [`SCALE`] are truncated before parsing, exactly as the input
/// echo truncates them, so `"1.23456"` parses to `1.2345`.
#[must_use]
pub fn parse_number(text: &str) -> Decimal {
    parse_optional_number(text).unwrap_or(Decimal::ZERO)
}

/// Echo typed input back in grouped form.
///
/// The input is sanitized (fraction truncated to [`SCALE`] digits) and the integer part
/// grouped in thousands. A trailing decimal point survives so partial input can still be
/// edited. Empty input formats to an empty string.
#[must_use]
pub fn format_input(text: &str) -> String {
    let cleaned = sanitize_input(text);

    match cleaned.split_once('.') {
        Some(("", frac_part)) => format!("0.{frac_part}"),
        Some((int_part, frac_part)) => {
            format!("{}.{frac_part}", group_thousands(trim_leading_zeros(int_part)))
        }
        None => group_thousands(trim_leading_zeros(&cleaned)),
    }
}

/// Format a computed value for display.
///
/// Rounds half away from zero to [`SCALE`] places, drops trailing zeros and groups the
/// integer part in thousands.
#[must_use]
pub fn format_number(value: Decimal) -> String {
    let rounded = round4(value).normalize();
    let digits = rounded.abs().to_string();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    match digits.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{sign}{}.{frac_part}", group_thousands(int_part))
        }
        None => format!("{sign}{}", group_thousands(&digits)),
    }
}

/// Format an optional computed value, rendering `None` as an empty string.
#[must_use]
pub fn format_optional(value: Option<Decimal>) -> String {
    value.map(format_number).unwrap_or_default()
}

fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');

    if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }

        out.push(ch);
    }

    out
}
