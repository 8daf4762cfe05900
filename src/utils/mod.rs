//! Utility functions for rounding and formatting
//!
//! This module provides centralized rounding and formatting utilities for
//! consistent display of rupee amounts and percentages throughout the
//! application. Amounts are rounded to two decimals, midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "₹" prefix (Indian Rupee)
    Inr,
    /// No currency symbol (for table cells, calculations display)
    None,
}

/// Round a money value to two decimal places (2.625 -> 2.63, -2.625 -> -2.63)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percentage to two decimal places
pub fn round_percent(value: Decimal) -> Decimal {
    round_money(value)
}

/// Core formatting function with full control over output.
///
/// # Arguments
/// * `value` - The decimal value to format
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
/// * `symbol` - Whether to include currency symbol
///
/// # Examples
/// ```
/// use etfcalc::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.567), 0, CurrencySymbol::Inr),
///     "₹1234.57"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 10, CurrencySymbol::None),
///     "   1234.00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let rounded = round_money(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::Inr => "₹",
        CurrencySymbol::None => "",
    };

    let result = format!("{}{}{:.2}", sign, prefix, rounded.abs());

    // Pad by characters, not bytes: the rupee sign is multi-byte
    let len = result.chars().count();
    if width > len {
        format!("{}{}", " ".repeat(width - len), result)
    } else {
        result
    }
}

/// Format as rupees with symbol: "₹1234.56"
///
/// # Examples
/// ```
/// use etfcalc::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(10500)), "₹10500.00");
/// assert_eq!(format_currency(dec!(-500)), "-₹500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Inr)
}

/// Format as rupees, right-aligned to specified width.
pub fn format_currency_aligned(value: Decimal, width: usize) -> String {
    format_currency_with_width(value, width, CurrencySymbol::Inr)
}

/// Format a percentage with two decimals, or "N/A" when undefined
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}%", round_percent(v)),
        None => "N/A".to_string(),
    }
}

/// Format a fractional rate as a percentage without trailing zeros: 0.00025 -> "0.025%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
