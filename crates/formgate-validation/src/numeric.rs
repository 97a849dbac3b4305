//! Numeric coercion and range checks

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

/// Signed decimal with optional fraction and exponent. No `inf`, `nan` or hex.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// Parse a whole number that round-trips exactly.
///
/// The text must equal the canonical rendering of the parsed value, so
/// `"+5"`, `"007"`, `"-0"` and `"4.0"` are all rejected.
pub fn parse_whole_number(text: &str) -> Option<i64> {
    let number: i64 = text.parse().ok()?;
    if number.to_string() == text {
        Some(number)
    } else {
        None
    }
}

pub fn is_numeric_literal(text: &str) -> bool {
    NUMERIC_LITERAL.is_match(text)
}

/// Parse a general numeric literal (`"3"`, `"-2.5"`, `".5"`, `"1e3"`)
pub fn parse_number(text: &str) -> Option<f64> {
    if !is_numeric_literal(text) {
        return None;
    }
    text.parse().ok()
}

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + fmt::Display> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn check(&self, value: T, label: &str) -> Result<T, ValidationError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(ValidationError::out_of_range(label, self.min, self.max))
        }
    }
}

/// Whole number within `bounds`
pub fn validate_whole_number(text: &str, bounds: Bounds<i64>, label: &str) -> Result<i64, ValidationError> {
    let number = parse_whole_number(text).ok_or_else(|| ValidationError::not_an_integer(label))?;
    bounds.check(number, label)
}

/// Any numeric literal within `bounds`
pub fn validate_number(text: &str, bounds: Bounds<f64>, label: &str) -> Result<f64, ValidationError> {
    let number = parse_number(text).ok_or_else(|| ValidationError::not_a_number(label))?;
    bounds.check(number, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", Some(42))]
    #[case("-17", Some(-17))]
    #[case("0", Some(0))]
    #[case("42.0", None)]
    #[case("3.5", None)]
    #[case("3abc", None)]
    #[case("+5", None)]
    #[case("007", None)]
    #[case("-0", None)]
    #[case("1e3", None)]
    #[case("99999999999999999999", None)]
    fn test_whole_number_round_trip(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_whole_number(text), expected);
    }

    #[rstest]
    #[case("3.25", Some(3.25))]
    #[case("-2", Some(-2.0))]
    #[case("+2.5", Some(2.5))]
    #[case(".5", Some(0.5))]
    #[case("5.", Some(5.0))]
    #[case("1e3", Some(1000.0))]
    #[case("2.5E-1", Some(0.25))]
    #[case("abc", None)]
    #[case("inf", None)]
    #[case("NaN", None)]
    #[case("0x1A", None)]
    #[case("1,5", None)]
    #[case(".", None)]
    #[case("e5", None)]
    fn test_numeric_literal(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_number(text), expected);
    }

    #[test]
    fn test_range_validation() {
        let bounds = Bounds::new(1, 10);
        assert!(bounds.contains(1));
        assert!(bounds.contains(10));
        assert!(!bounds.contains(0));
        assert!(!bounds.contains(11));
    }

    #[test]
    fn test_validate_number_checks_parse_before_range() {
        let bounds = Bounds::new(0.0, 10.0);
        assert_eq!(validate_number("abc", bounds, "Weight"), Err(ValidationError::not_a_number("Weight")));
        assert_eq!(
            validate_number("10.5", bounds, "Weight"),
            Err(ValidationError::out_of_range("Weight", 0.0, 10.0))
        );
        assert_eq!(validate_whole_number("7", Bounds::new(1, 9), "Age"), Ok(7));
    }
}
