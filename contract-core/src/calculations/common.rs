//! Common utility functions for contract calculations.
//!
//! This module provides the numeric primitives shared by the engine, the
//! display view and the submission export: cent rounding, tolerant parsing
//! of raw field text, and currency formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use contract_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses raw field text into a [`Decimal`], coercing anything unparseable to zero.
///
/// Empty or whitespace-only input is zero. Plain (`"1,234.56"`) and
/// scientific (`"1.5e3"`) notation are accepted. Invalid input never fails
/// the calculation; it is logged at debug level and treated as zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use contract_core::calculations::common::parse_number;
///
/// assert_eq!(parse_number("1,234.56"), dec!(1234.56));
/// assert_eq!(parse_number(""), Decimal::ZERO);
/// assert_eq!(parse_number("abc"), Decimal::ZERO);
/// ```
pub fn parse_number(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or_else(|e| {
            debug!(input = %s, "coercing unparseable number to zero: {}", e);
            Decimal::ZERO
        })
}

/// Formats an amount as US currency: a `$` sign, thousands separators and
/// exactly two decimal digits.
///
/// The amount is rounded to the cent first. Negative amounts carry a
/// leading minus sign ahead of the dollar sign.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use contract_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
/// assert_eq!(format_currency(Decimal::ZERO), "$0.00");
/// assert_eq!(format_currency(dec!(-5000)), "-$5,000.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}
