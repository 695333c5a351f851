//! Numeric display formatting with explicit precision and locale.

use serde::{Deserialize, Serialize};

/// Separators used when printing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub currency_symbol: char,
}

impl NumberLocale {
    pub const EN_US: Self = Self {
        thousands_separator: ',',
        decimal_separator: '.',
        currency_symbol: '$',
    };
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// `1234.5` → `$1,234.50` at precision 2.
pub fn format_currency(value: f64, precision: usize, locale: NumberLocale) -> String {
    let number = format_decimal(value.abs(), precision, locale);
    if value.is_sign_negative() && value != 0.0 {
        format!("-{}{number}", locale.currency_symbol)
    } else {
        format!("{}{number}", locale.currency_symbol)
    }
}

/// `1234567` → `1,234,567`.
pub fn format_grouped(value: u64, locale: NumberLocale) -> String {
    group_digits(&value.to_string(), locale.thousands_separator)
}

/// `1234567` → `$1,234,567`.
pub fn format_currency_grouped(value: u64, locale: NumberLocale) -> String {
    format!("{}{}", locale.currency_symbol, format_grouped(value, locale))
}

/// `-4.256` → `-4.26%` at precision 2.
pub fn format_percent(value: f64, precision: usize, locale: NumberLocale) -> String {
    let number = format_decimal(value.abs(), precision, locale);
    if value.is_sign_negative() && round_to(value.abs(), precision) != 0.0 {
        format!("-{number}%")
    } else {
        format!("{number}%")
    }
}

/// Non-negative decimal with grouped integer part.
fn format_decimal(value: f64, precision: usize, locale: NumberLocale) -> String {
    let fixed = format!("{value:.precision$}");
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = group_digits(integer, locale.thousands_separator);
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round() / factor
}
