//! Field sources
//!
//! A field source is any read-only mapping from field name to the raw value a
//! user submitted: either one string or, for grouped controls such as
//! checkbox sets, an ordered sequence of strings.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

/// Borrowed view of one submitted field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Single(&'a str),
    Multiple(&'a [String]),
}

impl<'a> RawValue<'a> {
    /// Scalar view used by text and numeric fields.
    ///
    /// A sequence resolves to its last element, the way repeated scalar keys
    /// collapse in a query string. An empty sequence has no text.
    pub fn last_text(&self) -> Option<&'a str> {
        match *self {
            RawValue::Single(text) => Some(text),
            RawValue::Multiple(values) => values.last().map(String::as_str),
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, RawValue::Multiple(_))
    }
}

/// Owned field value, as stored by map-backed sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    pub fn as_raw(&self) -> RawValue<'_> {
        match self {
            FieldValue::Single(text) => RawValue::Single(text),
            FieldValue::Multiple(values) => RawValue::Multiple(values),
        }
    }

    /// Append another submitted value, promoting a single value to a sequence
    pub fn push(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self {
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::Multiple(vec![first, value]);
            }
            FieldValue::Multiple(values) => values.push(value),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multiple(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Read-only access to submitted fields
///
/// The engine never mutates a source. Presence is decided by key existence;
/// what counts as "empty" is left to each validator.
pub trait FieldSource {
    /// Raw value submitted under `name`, if the key exists
    fn raw(&self, name: &str) -> Option<RawValue<'_>>;

    /// Whether the key exists at all
    fn contains(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn raw(&self, name: &str) -> Option<RawValue<'_>> {
        (**self).raw(name)
    }
}

impl<H: BuildHasher> FieldSource for HashMap<String, String, H> {
    fn raw(&self, name: &str) -> Option<RawValue<'_>> {
        self.get(name).map(|text| RawValue::Single(text))
    }
}

impl<H: BuildHasher> FieldSource for HashMap<String, FieldValue, H> {
    fn raw(&self, name: &str) -> Option<RawValue<'_>> {
        self.get(name).map(FieldValue::as_raw)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn raw(&self, name: &str) -> Option<RawValue<'_>> {
        self.get(name).map(|text| RawValue::Single(text))
    }
}

impl FieldSource for BTreeMap<String, FieldValue> {
    fn raw(&self, name: &str) -> Option<RawValue<'_>> {
        self.get(name).map(FieldValue::as_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_promotes_single_to_multiple() {
        let mut value = FieldValue::from("a");
        value.push("b");
        value.push("c");

        assert_eq!(value, FieldValue::from(vec!["a", "b", "c"]));
    }

    #[test]
    fn test_last_text() {
        let many = vec!["first".to_string(), "last".to_string()];
        assert_eq!(RawValue::Single("x").last_text(), Some("x"));
        assert_eq!(RawValue::Multiple(&many).last_text(), Some("last"));
        assert_eq!(RawValue::Multiple(&[]).last_text(), None);
    }

    #[test]
    fn test_map_sources() {
        let mut plain = HashMap::new();
        plain.insert("name".to_string(), "Ada".to_string());
        assert_eq!(plain.raw("name"), Some(RawValue::Single("Ada")));
        assert!(!plain.contains("missing"));

        let mut grouped = BTreeMap::new();
        grouped.insert("tags".to_string(), FieldValue::from(vec!["a", "b"]));
        assert!(grouped.raw("tags").map(|raw| raw.is_multiple()).unwrap_or(false));

        // Borrowed sources behave like the owner
        let borrowed = &grouped;
        assert!(borrowed.contains("tags"));
    }
}
