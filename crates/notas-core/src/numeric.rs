//! Decimal normalization between source notation and display notation.
//!
//! Fiscal XML writes decimals with `.` (`"1234.56"`); spreadsheets for this
//! audience expect `,` (`"1234,56"`). All arithmetic happens on [`Decimal`];
//! text is produced once, when a record is assembled.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fraction digits always shown.
pub const MIN_FRACTION_DIGITS: u32 = 2;

/// Values with more fraction digits than this are rounded half-even.
pub const MAX_FRACTION_DIGITS: u32 = 10;

/// Parse a source decimal, returning `None` for empty or non-numeric text.
///
/// `.` is the decimal separator. A lone `,` with no `.` is accepted as the
/// separator too, since some issuer software writes it that way.
pub fn try_parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if !text.contains('.') && text.matches(',').count() == 1 {
        return Decimal::from_str(&text.replace(',', ".")).ok();
    }

    Decimal::from_str(text).ok()
}

/// Parse a source decimal; anything non-numeric counts as zero.
pub fn parse_decimal(text: &str) -> Decimal {
    try_parse_decimal(text).unwrap_or(Decimal::ZERO)
}

/// Render a decimal with `,` as separator and at least two fraction digits.
pub fn format_decimal(value: Decimal) -> String {
    if value.is_zero() {
        return "0,00".to_string();
    }

    let mut value = value.normalize();
    if value.scale() > MAX_FRACTION_DIGITS {
        value = value
            .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointNearestEven)
            .normalize();
    }
    if value.scale() < MIN_FRACTION_DIGITS {
        value.rescale(MIN_FRACTION_DIGITS);
    }

    value.to_string().replace('.', ",")
}

/// Render an optional decimal; `None` renders as `"0,00"`.
pub fn format_optional(value: Option<Decimal>) -> String {
    format_decimal(value.unwrap_or(Decimal::ZERO))
}

/// Convert source text straight to display text.
pub fn format_source(text: &str) -> String {
    format_optional(try_parse_decimal(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1234.56"), dec("1234.56"));
        assert_eq!(parse_decimal(" 100.00 "), dec("100"));
        assert_eq!(parse_decimal("-3.5"), dec("-3.5"));
        assert_eq!(parse_decimal("18,00"), dec("18"));
    }

    #[test]
    fn test_non_numeric_is_zero() {
        assert_eq!(parse_decimal(""), Decimal::ZERO);
        assert_eq!(parse_decimal("abc"), Decimal::ZERO);
        assert_eq!(parse_decimal("1.234,56"), Decimal::ZERO);
        assert_eq!(try_parse_decimal("   "), None);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(dec("150.00")), "150,00");
        assert_eq!(format_decimal(dec("150")), "150,00");
        assert_eq!(format_decimal(dec("0.1")), "0,10");
        assert_eq!(format_decimal(dec("12.3456")), "12,3456");
        assert_eq!(format_decimal(dec("-7.5")), "-7,50");
        assert_eq!(format_decimal(dec("-0.00")), "0,00");
    }

    #[test]
    fn test_format_rounds_half_even_past_max_digits() {
        assert_eq!(format_decimal(dec("1.000000000050")), "1,00");
        assert_eq!(format_decimal(dec("1.000000000150")), "1,0000000002");
    }

    #[test]
    fn test_missing_formats_as_zero() {
        assert_eq!(format_optional(None), "0,00");
        assert_eq!(format_source(""), "0,00");
        assert_eq!(format_source("99.9"), "99,90");
    }

    #[test]
    fn test_source_notation_round_trip() {
        for source in ["0.00", "1.50", "100.00", "123456.78", "0.01"] {
            let display = format_decimal(parse_decimal(source));
            assert_eq!(display, source.replace('.', ","));
        }
    }
}
