//! Helper functions and utilities
//!
//! Parsing and formatting of the numbers learners type into the chat.

use once_cell::sync::Lazy;
use regex::Regex;

static SIGNED_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid regex"));

/// Parse a decimal number, accepting a comma as the decimal separator.
///
/// Non-finite values are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let value = text.trim().replace(',', ".").parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parse a number with a dot decimal separator only
pub fn parse_plain_number(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Parse an optionally negative integer made of ASCII digits
pub fn parse_signed_int(text: &str) -> Option<i64> {
    let text = text.trim();
    if SIGNED_INT.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Parse a non-negative integer made of ASCII digits only
pub fn parse_unsigned_int(text: &str) -> Option<i64> {
    let text = text.trim();
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Split a list answer on `,` or `;`, trimming each item
pub fn split_list(text: &str) -> Vec<String> {
    text.replace(';', ",")
        .split(',')
        .map(|part| part.trim().to_string())
        .collect()
}

/// Greatest common divisor of the absolute values
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    // only 2^63 itself does not fit back into i64
    i64::try_from(a).unwrap_or(1)
}

/// Relative-plus-absolute tolerance comparison used by every numeric check:
/// `|submitted - expected| <= max(1e-9, |expected| * 1e-6)`.
pub fn within_tolerance(submitted: f64, expected: f64) -> bool {
    (submitted - expected).abs() <= f64::max(1e-9, expected.abs() * 1e-6)
}

/// Format a number with up to six significant digits, dropping trailing zeros
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    if !(-5..6).contains(&magnitude) {
        let formatted = format!("{:.5e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
            None => formatted,
        };
    }
    let decimals = (5 - magnitude).max(0) as usize;
    let formatted = trim_fraction(&format!("{:.*}", decimals, value)).to_string();
    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
