//! Owned field source built from request bodies

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use formgate_validation::{FieldSource, FieldValue, RawValue};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Submitted form fields, stored exactly as received.
///
/// Nothing is trimmed or coerced here; that is the validators' job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, FieldValue>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from single-valued form fields
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name, FieldValue::Single(value)))
            .collect();

        Self { fields }
    }

    /// Create from decoded name/value pairs.
    ///
    /// A `name[]` key produces a sequence stored under `name`, in submission
    /// order. A plain name seen more than once keeps only its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.append(name, value);
        }
        form
    }

    /// Parse an `application/x-www-form-urlencoded` body or query string
    pub fn from_urlencoded(body: &str) -> Result<Self> {
        let mut form = Self::new();

        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = decode_component(name)
                .with_context(|| format!("Failed to decode form field name: {:?}", name))?;
            let value = decode_component(value)
                .with_context(|| format!("Failed to decode value of form field {:?}", name))?;
            form.append(name, value);
        }

        Ok(form)
    }

    /// Create from a JSON object.
    ///
    /// Strings, numbers and booleans become single values, arrays become
    /// sequences, `null` counts as not submitted. Anything other than an
    /// object yields empty form data.
    pub fn from_json(json: JsonValue) -> Self {
        let JsonValue::Object(map) = json else {
            tracing::warn!("JSON form body is not an object; treating it as empty");
            return Self::new();
        };

        let fields = map
            .into_iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    JsonValue::Null => return None,
                    JsonValue::Array(items) => FieldValue::Multiple(items.into_iter().map(json_text).collect()),
                    other => FieldValue::Single(json_text(other)),
                };
                Some((name, value))
            })
            .collect();

        Self { fields }
    }

    /// Add one submitted value, following the same rules as [`FormData::from_pairs`]
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match name.strip_suffix("[]") {
            Some(group) => self
                .fields
                .entry(group.to_string())
                .or_insert_with(|| FieldValue::Multiple(Vec::new()))
                .push(value),
            None => {
                self.fields.insert(name, FieldValue::Single(value));
            }
        }
    }

    /// Replace whatever was submitted under `name`
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a form field value
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check if a field exists
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names
    pub fn keys(&self) -> Vec<&String> {
        self.fields.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldSource for FormData {
    fn raw(&self, name: &str) -> Option<RawValue<'_>> {
        self.fields.get(name).map(FieldValue::as_raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// Percent-decode one urlencoded component, with `+` meaning space
fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced)?;
    Ok(decoded.into_owned())
}

fn json_text(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        other => other.to_string(),
    }
}
