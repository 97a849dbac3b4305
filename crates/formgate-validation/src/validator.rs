//! Per-submission validator
//!
//! [`FormValidator`] borrows one field source and owns the error collection
//! for it. Each method validates a single field, returns the coerced value on
//! success and records at most one message, under that field's name, on
//! failure. Call each field's method once.

use crate::errors::FieldErrors;
use crate::numeric::Bounds;
use crate::outcome::Outcome;
use crate::pipeline::{self, Presence};
use crate::source::FieldSource;

pub struct FormValidator<'s, S: FieldSource + ?Sized> {
    source: &'s S,
    errors: FieldErrors,
}

impl<'s, S: FieldSource + ?Sized> FormValidator<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self::with_errors(source, FieldErrors::new())
    }

    /// Continue accumulating into errors collected elsewhere
    pub fn with_errors(source: &'s S, errors: FieldErrors) -> Self {
        Self { source, errors }
    }

    pub fn source(&self) -> &'s S {
        self.source
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    /// `Ok(())` if every field so far passed
    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }

    /// Settle an outcome from a custom pipeline under `name`
    pub fn check<T>(&mut self, name: &str, outcome: Outcome<T>) -> Option<T> {
        outcome.settle(name, &mut self.errors)
    }

    // Strings

    pub fn required_string(&mut self, name: &str, label: &str, max_length: usize) -> Option<String> {
        let outcome = pipeline::text(self.source, name, label, max_length, Presence::Required);
        self.check(name, outcome)
    }

    pub fn optional_string(&mut self, name: &str, label: &str, max_length: usize) -> Option<String> {
        let outcome = pipeline::text(self.source, name, label, max_length, Presence::Optional);
        self.check(name, outcome)
    }

    /// `default` comes back unchecked when the field is missing or blank
    pub fn defaulting_string(
        &mut self,
        name: &str,
        label: &str,
        max_length: usize,
        default: impl Into<String>,
    ) -> Option<String> {
        let presence = Presence::Defaulting(default.into());
        let outcome = pipeline::text(self.source, name, label, max_length, presence);
        self.check(name, outcome)
    }

    // Integers

    pub fn required_int(&mut self, name: &str, label: &str, max_length: usize, min: i64, max: i64) -> Option<i64> {
        let outcome = pipeline::integer(
            self.source,
            name,
            label,
            max_length,
            Bounds::new(min, max),
            Presence::Required,
        );
        self.check(name, outcome)
    }

    pub fn optional_int(&mut self, name: &str, label: &str, max_length: usize, min: i64, max: i64) -> Option<i64> {
        let outcome = pipeline::integer(
            self.source,
            name,
            label,
            max_length,
            Bounds::new(min, max),
            Presence::Optional,
        );
        self.check(name, outcome)
    }

    pub fn defaulting_int(
        &mut self,
        name: &str,
        label: &str,
        max_length: usize,
        min: i64,
        max: i64,
        default: i64,
    ) -> Option<i64> {
        let outcome = pipeline::integer(
            self.source,
            name,
            label,
            max_length,
            Bounds::new(min, max),
            Presence::Defaulting(default),
        );
        self.check(name, outcome)
    }

    // Floats

    pub fn required_float(&mut self, name: &str, label: &str, max_length: usize, min: f64, max: f64) -> Option<f64> {
        let outcome = pipeline::float(
            self.source,
            name,
            label,
            max_length,
            Bounds::new(min, max),
            Presence::Required,
        );
        self.check(name, outcome)
    }

    pub fn optional_float(&mut self, name: &str, label: &str, max_length: usize, min: f64, max: f64) -> Option<f64> {
        let outcome = pipeline::float(
            self.source,
            name,
            label,
            max_length,
            Bounds::new(min, max),
            Presence::Optional,
        );
        self.check(name, outcome)
    }

    pub fn defaulting_float(
        &mut self,
        name: &str,
        label: &str,
        max_length: usize,
        min: f64,
        max: f64,
        default: f64,
    ) -> Option<f64> {
        let outcome = pipeline::float(
            self.source,
            name,
            label,
            max_length,
            Bounds::new(min, max),
            Presence::Defaulting(default),
        );
        self.check(name, outcome)
    }

    // Choices

    pub fn required_radio<L: AsRef<str>>(&mut self, name: &str, label: &str, legal: &[L]) -> Option<String> {
        let outcome = pipeline::radio(self.source, name, label, legal, Presence::Required);
        self.check(name, outcome)
    }

    pub fn optional_radio<L: AsRef<str>>(&mut self, name: &str, label: &str, legal: &[L]) -> Option<String> {
        let outcome = pipeline::radio(self.source, name, label, legal, Presence::Optional);
        self.check(name, outcome)
    }

    pub fn optional_checkbox(&mut self, name: &str, label: &str, legal: &str) -> Option<String> {
        let outcome = pipeline::checkbox(self.source, name, label, legal);
        self.check(name, outcome)
    }

    /// `Some(vec![])` when nothing was checked, `None` only on failure
    pub fn multiple_checkboxes<L: AsRef<str>>(&mut self, name: &str, label: &str, legal: &[L]) -> Option<Vec<String>> {
        let outcome = pipeline::checkboxes(self.source, name, label, legal);
        self.check(name, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_errors_accumulate_across_fields() {
        let mut input = HashMap::new();
        input.insert("age".to_string(), "abc".to_string());
        input.insert("name".to_string(), "Ada".to_string());

        let mut form = FormValidator::new(&input);
        assert_eq!(form.required_string("name", "Name", 10), Some("Ada".to_string()));
        assert_eq!(form.required_int("age", "Age", 3, 0, 130), None);
        assert_eq!(form.required_string("email", "Email", 50), None);

        let errors = form.into_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("age"), Some("Age must be a whole number"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert!(!errors.contains("name"));
    }

    #[test]
    fn test_with_errors_continues_collection() {
        let input: HashMap<String, String> = HashMap::new();
        let mut earlier = FieldErrors::new();
        earlier.insert("captcha", "Captcha is required");

        let mut form = FormValidator::with_errors(&input, earlier);
        form.optional_string("nickname", "Nickname", 10);

        assert!(form.has_errors());
        assert_eq!(form.errors().len(), 1);
    }
}
