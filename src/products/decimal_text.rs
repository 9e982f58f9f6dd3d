//! # Decimal Text
//!
//! Exact reading of decimal numbers from client text.
//!
//! Accepted: an optional sign, digits with an optional fraction, and an
//! optional exponent (`"99.90"`, `"-1"`, `".5"`, `"1e3"`). Digit separators,
//! `NaN` and infinities are rejected. Precision is measured on the text
//! itself, so nothing is rounded before it is checked.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

const DECIMAL_PATTERN: &str = r"^([+-]?)([0-9]*)(?:\.([0-9]*))?(?:[eE]([+-]?[0-9]+))?$";

/// Largest mantissa `Decimal` holds without rounding, in digits
const MAX_EXACT_DIGITS: usize = 28;

static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn pattern() -> Option<&'static Regex> {
    PATTERN
        .get_or_init(|| Regex::new(DECIMAL_PATTERN).ok())
        .as_ref()
}

/// A parsed decimal: significant digits and where the point sits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalText {
    negative: bool,
    /// No leading or trailing zeros; empty for zero
    digits: String,
    /// Number of digits before the decimal point; may be negative or exceed
    /// `digits.len()`
    point: i64,
}

impl DecimalText {
    /// Parse `text`, which must already be trimmed
    pub fn parse(text: &str) -> Option<Self> {
        let captures = pattern()?.captures(text)?;
        let whole = captures.get(2).map_or("", |m| m.as_str());
        let fraction = captures.get(3).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let exponent: i64 = match captures.get(4) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let negative = captures.get(1).is_some_and(|m| m.as_str() == "-");

        let all = format!("{}{}", whole, fraction);
        let significant = all.trim_start_matches('0');
        let leading_zeros = all.len() - significant.len();
        let digits = significant.trim_end_matches('0').to_string();

        let point = if digits.is_empty() {
            0
        } else {
            i64::try_from(whole.len())
                .ok()?
                .checked_sub(i64::try_from(leading_zeros).ok()?)?
                .checked_add(exponent)?
        };

        Some(Self {
            negative,
            digits,
            point,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Strictly below zero; `-0` is zero
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    fn len(&self) -> i64 {
        i64::try_from(self.digits.len()).unwrap_or(i64::MAX)
    }

    /// Significant digits after the decimal point
    pub fn decimal_places(&self) -> u64 {
        u64::try_from(self.len().saturating_sub(self.point)).unwrap_or(0)
    }

    /// Digits before the decimal point, not counting leading zeros
    pub fn whole_digits(&self) -> u64 {
        u64::try_from(self.point).unwrap_or(0)
    }

    pub fn total_digits(&self) -> u64 {
        self.whole_digits().saturating_add(self.decimal_places())
    }

    /// The exact value, or `None` when `Decimal` cannot hold it unrounded
    pub fn to_decimal(&self) -> Option<Decimal> {
        if self.is_zero() {
            return Some(Decimal::ZERO);
        }

        let padding = usize::try_from(self.point.saturating_sub(self.len())).unwrap_or(0);
        if self.digits.len().saturating_add(padding) > MAX_EXACT_DIGITS {
            return None;
        }
        let scale = u32::try_from(self.decimal_places()).ok()?;

        let mut mantissa: i128 = format!("{}{}", self.digits, "0".repeat(padding))
            .parse()
            .ok()?;
        if self.negative {
            mantissa = -mantissa;
        }
        Decimal::try_from_i128_with_scale(mantissa, scale).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DecimalText {
        DecimalText::parse(text).unwrap()
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(pattern().is_some());
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse("99.90").to_decimal().unwrap().to_string(), "99.9");
        assert_eq!(parse("-1").to_decimal().unwrap().to_string(), "-1");
        assert_eq!(parse(".5").to_decimal().unwrap().to_string(), "0.5");
        assert_eq!(parse("7.").to_decimal().unwrap().to_string(), "7");
        assert_eq!(parse("1e3").to_decimal().unwrap().to_string(), "1000");
        assert_eq!(parse("25E-1").to_decimal().unwrap().to_string(), "2.5");
    }

    #[test]
    fn test_rejects_non_decimal_text() {
        let rejected = [
            "", ".", "1_000", "1,000", "NaN", "inf", "-Infinity", "1e", "e5", "1.2.3", "0x10",
            " 1",
        ];
        for text in rejected {
            assert!(DecimalText::parse(text).is_none(), "{:?}", text);
        }
    }

    #[test]
    fn test_digit_counts_ignore_insignificant_zeros() {
        let value = parse("000123.4500");
        assert_eq!(value.whole_digits(), 3);
        assert_eq!(value.decimal_places(), 2);
        assert_eq!(value.total_digits(), 5);

        let value = parse("0.005");
        assert_eq!(value.whole_digits(), 0);
        assert_eq!(value.decimal_places(), 3);

        let value = parse("5e2");
        assert_eq!(value.whole_digits(), 3);
        assert_eq!(value.decimal_places(), 0);
    }

    #[test]
    fn test_long_fraction_is_counted_not_rounded() {
        let value = parse("1.0000000000000000000000000000001");
        assert_eq!(value.decimal_places(), 31);
        assert_eq!(value.total_digits(), 32);
        assert!(value.to_decimal().is_none());
    }

    #[test]
    fn test_long_integer_is_counted() {
        let value = parse(&"9".repeat(35));
        assert_eq!(value.whole_digits(), 35);
        assert!(value.to_decimal().is_none());
    }

    #[test]
    fn test_zero_and_sign() {
        assert!(parse("-0.00").is_zero());
        assert!(!parse("-0.00").is_negative());
        assert!(parse("-0.01").is_negative());
        assert_eq!(parse("0e99").to_decimal(), Some(Decimal::ZERO));
    }
}
