//! Validation failures and the per-request error collection

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of choice control rejected a value; appears in the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Buttons,
    Checkbox,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Buttons => f.write_str("buttons"),
            Control::Checkbox => f.write_str("checkbox"),
        }
    }
}

/// A single field failure.
///
/// `Display` renders the end-user sentence stored in [`FieldErrors`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required text or numeric field missing, or blank after trimming
    #[error("{label} is required")]
    Required { label: String },

    /// Required radio group with nothing selected
    #[error("You didn't select one of the {label} buttons")]
    NoSelection { label: String },

    #[error("{label} must be {max} characters or less")]
    TooLong { label: String, max: usize },

    #[error("{label} must be a whole number")]
    NotAnInteger { label: String },

    #[error("{label} must be a number")]
    NotANumber { label: String },

    /// Bounds are kept pre-rendered so integer and float ranges share one variant
    #[error("{label} must be between {min} and {max} inclusive")]
    OutOfRange {
        label: String,
        min: String,
        max: String,
    },

    #[error("You provided an illegal value for the {label} {control}")]
    IllegalChoice { label: String, control: Control },

    /// A single value arrived where a checkbox group expects a sequence
    #[error("You provided an illegal value for the {label} checkbox")]
    ScalarForMultiple { label: String },
}

impl ValidationError {
    pub fn required(label: &str) -> Self {
        Self::Required {
            label: label.to_string(),
        }
    }

    pub fn no_selection(label: &str) -> Self {
        Self::NoSelection {
            label: label.to_string(),
        }
    }

    pub fn too_long(label: &str, max: usize) -> Self {
        Self::TooLong {
            label: label.to_string(),
            max,
        }
    }

    pub fn not_an_integer(label: &str) -> Self {
        Self::NotAnInteger {
            label: label.to_string(),
        }
    }

    pub fn not_a_number(label: &str) -> Self {
        Self::NotANumber {
            label: label.to_string(),
        }
    }

    pub fn out_of_range(label: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::OutOfRange {
            label: label.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn illegal_choice(label: &str, control: Control) -> Self {
        Self::IllegalChoice {
            label: label.to_string(),
            control,
        }
    }

    pub fn scalar_for_multiple(label: &str) -> Self {
        Self::ScalarForMultiple {
            label: label.to_string(),
        }
    }

    /// Label of the field this error was raised for
    pub fn label(&self) -> &str {
        match self {
            Self::Required { label }
            | Self::NoSelection { label }
            | Self::TooLong { label, .. }
            | Self::NotAnInteger { label }
            | Self::NotANumber { label }
            | Self::OutOfRange { label, .. }
            | Self::IllegalChoice { label, .. }
            | Self::ScalarForMultiple { label } => label,
        }
    }
}

/// Field name to message map, accumulated over one form submission.
///
/// Holds at most one message per field. The first failure recorded for a
/// field is kept; later ones for the same key are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` under `field`. Returns false if the field already failed.
    pub fn record(&mut self, field: &str, error: &ValidationError) -> bool {
        self.insert(field, error.to_string())
    }

    /// Record a raw message under `field`. Returns false if the field already failed.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) -> bool {
        use std::collections::btree_map::Entry;

        match self.entries.entry(field.into()) {
            Entry::Vacant(slot) => {
                slot.insert(message.into());
                true
            }
            Entry::Occupied(existing) => {
                let dropped: String = message.into();
                tracing::warn!(
                    field = %existing.key(),
                    kept = %existing.get(),
                    dropped = %dropped,
                    "field already has an error"
                );
                false
            }
        }
    }

    /// Get the error message for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Field names with errors, in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Fold another collection into this one, keeping existing entries on conflict
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.entries {
            self.insert(field, message);
        }
    }

    /// `Ok(())` when nothing failed, otherwise the collection itself
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.entries {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<FieldErrors> for BTreeMap<String, String> {
    fn from(errors: FieldErrors) -> Self {
        errors.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::required("Name").to_string(), "Name is required");
        assert_eq!(
            ValidationError::too_long("Name", 10).to_string(),
            "Name must be 10 characters or less"
        );
        assert_eq!(
            ValidationError::out_of_range("Age", 1, 100).to_string(),
            "Age must be between 1 and 100 inclusive"
        );
        assert_eq!(
            ValidationError::out_of_range("Weight", 0.5_f64, 10.0_f64).to_string(),
            "Weight must be between 0.5 and 10 inclusive"
        );
        assert_eq!(
            ValidationError::no_selection("Size").to_string(),
            "You didn't select one of the Size buttons"
        );
        assert_eq!(
            ValidationError::illegal_choice("Size", Control::Buttons).to_string(),
            "You provided an illegal value for the Size buttons"
        );
        assert_eq!(
            ValidationError::scalar_for_multiple("Toppings").to_string(),
            "You provided an illegal value for the Toppings checkbox"
        );
    }

    #[test]
    fn test_first_error_wins() {
        let mut errors = FieldErrors::new();
        assert!(errors.record("age", &ValidationError::required("Age")));
        assert!(!errors.record("age", &ValidationError::not_an_integer("Age")));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("age"), Some("Age is required"));
    }

    #[test]
    fn test_merge_and_result() {
        let mut left = FieldErrors::new();
        left.insert("a", "A is required");

        let mut right = FieldErrors::new();
        right.insert("a", "ignored");
        right.insert("b", "B is required");

        left.merge(right);
        assert_eq!(left.get("a"), Some("A is required"));
        assert_eq!(left.fields().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(left.to_string(), "a: A is required; b: B is required");

        assert!(left.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"name":"Name is required"}"#);
    }
}
