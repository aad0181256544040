//! Reading numbers out of page text and input fields, and writing them back
//!
//! Page selections go through a strip-then-validate pass: everything except
//! digits, `.` and `-` is dropped and what is left must be one complete
//! decimal literal. Field values are read with prefix rules instead, so
//! `"12px"` reads as 12.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters kept from a page selection.
    static ref NON_NUMERIC: Regex = Regex::new(r"[^0-9.\-]").unwrap();

    /// A complete literal after stripping.
    static ref STRIPPED_LITERAL: Regex =
        Regex::new(r"^-?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap();

    /// The longest numeric prefix of a field value.
    static ref FLOAT_PREFIX: Regex = Regex::new(
        r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)"
    ).unwrap();
}

/// Extracts the number from selected page text.
///
/// Returns `None` when nothing numeric remains or when the remaining
/// characters do not form a single number (`"1.2.3"`, `"5-3"`, `"-"`).
pub fn extract_selection_number(raw: &str) -> Option<f64> {
    let clean = NON_NUMERIC.replace_all(raw.trim(), "");
    if !STRIPPED_LITERAL.is_match(&clean) {
        return None;
    }
    clean.parse().ok()
}

/// Parses the leading number of `text`, ignoring leading whitespace and
/// any trailing garbage.
pub fn parse_float(text: &str) -> Option<f64> {
    let literal = FLOAT_PREFIX.find(text.trim_start())?.as_str();
    match literal.trim_start_matches('+') {
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        digits => digits.parse().ok(),
    }
}

/// Parses an operand field. Thousands separators are dropped first.
pub fn parse_field(value: &str) -> Option<f64> {
    parse_float(&value.replace(',', ""))
}

/// Formats a number the way the page shows it.
///
/// Integers drop the fractional part, infinities are spelled out, and
/// magnitudes outside `[1e-6, 1e21)` switch to exponent notation with an
/// explicit sign on positive exponents.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== Selection extraction =====

    #[test]
    fn test_extract_plain_number() {
        assert_eq!(extract_selection_number("42"), Some(42.0));
        assert_eq!(extract_selection_number("  3.5 "), Some(3.5));
    }

    #[test]
    fn test_extract_strips_currency_and_separators() {
        assert_eq!(extract_selection_number("$1,234.50"), Some(1234.5));
        assert_eq!(extract_selection_number("€ 99"), Some(99.0));
        assert_eq!(extract_selection_number("-7 kg"), Some(-7.0));
    }

    #[test]
    fn test_extract_partial_literals() {
        assert_eq!(extract_selection_number(".5"), Some(0.5));
        assert_eq!(extract_selection_number("5."), Some(5.0));
        assert_eq!(extract_selection_number("-.25"), Some(-0.25));
    }

    #[test]
    fn test_extract_rejects_non_numbers() {
        assert_eq!(extract_selection_number(""), None);
        assert_eq!(extract_selection_number("hello"), None);
        assert_eq!(extract_selection_number("-"), None);
        assert_eq!(extract_selection_number("."), None);
        assert_eq!(extract_selection_number("1.2.3"), None);
        assert_eq!(extract_selection_number("5-3"), None);
        assert_eq!(extract_selection_number("2024-01-15"), None);
    }

    // ===== Field parsing =====

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("12px"), Some(12.0));
        assert_eq!(parse_float("  -3.5e2abc"), Some(-350.0));
        assert_eq!(parse_float("+.5"), Some(0.5));
        assert_eq!(parse_float("1e"), Some(1.0));
    }

    #[test]
    fn test_parse_float_infinity() {
        assert_eq!(parse_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float("+Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn test_parse_float_rejects() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("   "), None);
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float("."), None);
        assert_eq!(parse_float("-"), None);
        assert_eq!(parse_float("inf"), None);
    }

    #[test]
    fn test_parse_float_stops_at_non_ascii_digits() {
        assert_eq!(parse_float("12\u{663}"), Some(12.0));
        assert_eq!(parse_field("1.5e\u{663}"), Some(1.5));
        assert_eq!(parse_float("\u{663}12"), None);
        assert_eq!(extract_selection_number("\u{663}7"), Some(7.0));
    }

    #[test]
    fn test_parse_field_strips_commas() {
        assert_eq!(parse_field("1,234,567.8"), Some(1_234_567.8));
        assert_eq!(parse_field(",,"), None);
    }

    // ===== Formatting =====

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(34.0), "34");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(format_number(1.24), "1.24");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(0.000_001), "0.000001");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_exponent_notation() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_field(value in -1e15f64..1e15f64) {
            let shown = format_number(value);
            let parsed = parse_field(&shown).unwrap();
            if value == 0.0 {
                prop_assert_eq!(parsed, 0.0);
            } else {
                prop_assert_eq!(parsed, value);
            }
        }

        #[test]
        fn prop_selection_ignores_letters(n in 0u32..1_000_000, noise in "[a-zA-Z ]{0,6}") {
            let text = format!("{noise}{n}{noise}");
            prop_assert_eq!(extract_selection_number(&text), Some(f64::from(n)));
        }
    }
}
