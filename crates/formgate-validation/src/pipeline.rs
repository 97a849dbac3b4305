//! Validation pipeline
//!
//! Each function here runs the full stage sequence for one value shape:
//! presence resolution, then (for text-like shapes) trimming and the length
//! limit, then coercion and the range or membership check.
//!
//! Nothing is recorded here. Callers either settle the returned [`Outcome`]
//! into a [`FieldErrors`](crate::FieldErrors) themselves or go through
//! [`FormValidator`](crate::FormValidator), which does it for them.

use crate::collection::{first_illegal, is_one_of};
use crate::errors::{Control, ValidationError};
use crate::numeric::{self, Bounds};
use crate::outcome::Outcome;
use crate::source::{FieldSource, RawValue};
use crate::string;

/// How a field's absence is treated
#[derive(Debug, Clone, PartialEq)]
pub enum Presence<T> {
    /// Absence is an error
    Required,
    /// Absence yields no value and no error
    Optional,
    /// Absence yields this value; it is trusted and never checked
    Defaulting(T),
}

impl<T> Presence<T> {
    /// Terminal outcome for a field that was not supplied.
    ///
    /// `required` builds the error for the `Required` case only.
    pub fn when_missing(self, required: impl FnOnce() -> ValidationError) -> Outcome<T> {
        match self {
            Presence::Required => Outcome::Invalid(required()),
            Presence::Optional => Outcome::Absent,
            Presence::Defaulting(default) => Outcome::Valid(default),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Presence<U> {
        match self {
            Presence::Required => Presence::Required,
            Presence::Optional => Presence::Optional,
            Presence::Defaulting(default) => Presence::Defaulting(f(default)),
        }
    }
}

/// Shared front half of every text-like shape.
///
/// Missing or blank input resolves through `presence`. Otherwise the trimmed
/// text must fit in `max_length` characters before `coerce` sees it.
pub fn scalar<S, T, F>(
    source: &S,
    name: &str,
    label: &str,
    max_length: usize,
    presence: Presence<T>,
    coerce: F,
) -> Outcome<T>
where
    S: FieldSource + ?Sized,
    F: FnOnce(&str) -> Result<T, ValidationError>,
{
    let supplied = source
        .raw(name)
        .and_then(|raw| raw.last_text())
        .and_then(string::trimmed);

    let Some(text) = supplied else {
        return presence.when_missing(|| ValidationError::required(label));
    };

    if let Err(error) = string::validate_max_length(text, max_length, label) {
        return Outcome::Invalid(error);
    }

    coerce(text).into()
}

/// Trimmed string no longer than `max_length`
pub fn text<S: FieldSource + ?Sized>(
    source: &S,
    name: &str,
    label: &str,
    max_length: usize,
    presence: Presence<String>,
) -> Outcome<String> {
    scalar(source, name, label, max_length, presence, |text| Ok(text.to_string()))
}

/// Whole number that round-trips exactly and lies within `bounds`
pub fn integer<S: FieldSource + ?Sized>(
    source: &S,
    name: &str,
    label: &str,
    max_length: usize,
    bounds: Bounds<i64>,
    presence: Presence<i64>,
) -> Outcome<i64> {
    scalar(source, name, label, max_length, presence, |text| {
        numeric::validate_whole_number(text, bounds, label)
    })
}

/// Any numeric literal within `bounds`
pub fn float<S: FieldSource + ?Sized>(
    source: &S,
    name: &str,
    label: &str,
    max_length: usize,
    bounds: Bounds<f64>,
    presence: Presence<f64>,
) -> Outcome<f64> {
    scalar(source, name, label, max_length, presence, |text| {
        numeric::validate_number(text, bounds, label)
    })
}

/// One value out of a radio group.
///
/// Presence is key existence: an empty string is a real selection. The value
/// is returned exactly as submitted.
pub fn radio<S, L>(
    source: &S,
    name: &str,
    label: &str,
    legal: &[L],
    presence: Presence<String>,
) -> Outcome<String>
where
    S: FieldSource + ?Sized,
    L: AsRef<str>,
{
    match source.raw(name) {
        None => presence.when_missing(|| ValidationError::no_selection(label)),
        Some(RawValue::Single(value)) if is_one_of(value, legal) => Outcome::Valid(value.to_string()),
        Some(_) => Outcome::Invalid(ValidationError::illegal_choice(label, Control::Buttons)),
    }
}

/// A lone checkbox whose only legal value is `legal`. Always optional.
pub fn checkbox<S: FieldSource + ?Sized>(source: &S, name: &str, label: &str, legal: &str) -> Outcome<String> {
    match source.raw(name) {
        None => Outcome::Absent,
        Some(RawValue::Single(value)) if value == legal => Outcome::Valid(value.to_string()),
        Some(_) => Outcome::Invalid(ValidationError::illegal_choice(label, Control::Checkbox)),
    }
}

/// A checkbox group.
///
/// Nothing checked is a valid empty selection, never absence. A scalar or any
/// value outside `legal` rejects the whole group.
pub fn checkboxes<S, L>(source: &S, name: &str, label: &str, legal: &[L]) -> Outcome<Vec<String>>
where
    S: FieldSource + ?Sized,
    L: AsRef<str>,
{
    match source.raw(name) {
        None => Outcome::Valid(Vec::new()),
        Some(RawValue::Single(_)) => Outcome::Invalid(ValidationError::scalar_for_multiple(label)),
        Some(RawValue::Multiple(values)) => match first_illegal(values, legal) {
            Some(_) => Outcome::Invalid(ValidationError::illegal_choice(label, Control::Checkbox)),
            None => Outcome::Valid(values.to_vec()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FieldValue;
    use std::collections::HashMap;

    fn source(entries: &[(&str, FieldValue)]) -> HashMap<String, FieldValue> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_stage_order_length_before_type() {
        // Too long and not a number: the length check runs first
        let input = source(&[("qty", FieldValue::from("abcdef"))]);
        let outcome = integer(&input, "qty", "Quantity", 3, Bounds::new(0, 10), Presence::Required);
        assert_eq!(outcome, Outcome::Invalid(ValidationError::too_long("Quantity", 3)));
    }

    #[test]
    fn test_stage_order_type_before_range() {
        let input = source(&[("qty", FieldValue::from("x"))]);
        let outcome = integer(&input, "qty", "Quantity", 3, Bounds::new(5, 10), Presence::Required);
        assert_eq!(outcome, Outcome::Invalid(ValidationError::not_an_integer("Quantity")));
    }

    #[test]
    fn test_blank_text_resolves_through_presence() {
        let input = source(&[("bio", FieldValue::from("   "))]);

        assert_eq!(
            text(&input, "bio", "Bio", 10, Presence::Required),
            Outcome::Invalid(ValidationError::required("Bio"))
        );
        assert_eq!(text(&input, "bio", "Bio", 10, Presence::Optional), Outcome::Absent);
        assert_eq!(
            text(&input, "bio", "Bio", 10, Presence::Defaulting("none".to_string())),
            Outcome::Valid("none".to_string())
        );
    }

    #[test]
    fn test_sequence_for_text_uses_last_value() {
        let input = source(&[("city", FieldValue::from(vec!["Cork", " Galway "]))]);
        assert_eq!(
            text(&input, "city", "City", 20, Presence::Required),
            Outcome::Valid("Galway".to_string())
        );
    }

    #[test]
    fn test_radio_empty_string_is_a_selection() {
        let input = source(&[("size", FieldValue::from(""))]);
        assert_eq!(
            radio(&input, "size", "Size", &["", "s", "m"], Presence::Required),
            Outcome::Valid(String::new())
        );
    }

    #[test]
    fn test_radio_rejects_sequences() {
        let input = source(&[("size", FieldValue::from(vec!["s"]))]);
        assert_eq!(
            radio(&input, "size", "Size", &["s", "m"], Presence::Optional),
            Outcome::Invalid(ValidationError::illegal_choice("Size", Control::Buttons))
        );
    }

    #[test]
    fn test_checkboxes_present_but_empty_sequence() {
        let input = source(&[("tags", FieldValue::Multiple(Vec::new()))]);
        assert_eq!(checkboxes(&input, "tags", "Tags", &["a"]), Outcome::Valid(Vec::new()));
    }
}
