//! Declarative form schemas loaded from TOML

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use formgate_validation::{pipeline, Bounds, FieldErrors, FieldSource, Outcome, Presence, Value};
use serde::{Deserialize, Serialize};

/// A named list of field rules, validated in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    name: String,

    #[serde(default)]
    fields: Vec<FieldRule>,
}

/// How one field is extracted, coerced and constrained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Key in the submitted form
    pub name: String,

    /// Text used in error messages (defaults to `name`)
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub presence: PresenceRule,

    /// Returned as-is when a `defaulting` field is not supplied
    #[serde(default)]
    pub default: Option<Value>,

    #[serde(flatten)]
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceRule {
    Required,
    #[default]
    Optional,
    Defaulting,
}

/// Value shape and its constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text { max_length: usize },
    Integer { max_length: usize, min: i64, max: i64 },
    Float { max_length: usize, min: f64, max: f64 },
    Radio { options: Vec<String> },
    Checkbox { value: String },
    Checkboxes { options: Vec<String> },
}

impl FieldKind {
    fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Float { .. } => "float",
            FieldKind::Radio { .. } => "radio",
            FieldKind::Checkbox { .. } => "checkbox",
            FieldKind::Checkboxes { .. } => "checkboxes",
        }
    }

    /// Whether `value` has the right shape to be this kind's default
    fn accepts_default(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text { .. } | FieldKind::Radio { .. } => value.as_str().is_some(),
            FieldKind::Integer { .. } => value.as_i64().is_some(),
            FieldKind::Float { .. } => value.as_f64().is_some(),
            FieldKind::Checkbox { .. } | FieldKind::Checkboxes { .. } => false,
        }
    }
}

impl FieldRule {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            presence: PresenceRule::Optional,
            default: None,
            kind,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.presence = PresenceRule::Required;
        self.default = None;
        self
    }

    pub fn defaulting(mut self, default: impl Into<Value>) -> Self {
        self.presence = PresenceRule::Defaulting;
        self.default = Some(default.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Reject rules that could not be applied consistently
    pub fn check(&self) -> Result<()> {
        ensure!(!self.name.is_empty(), "field name must not be empty");

        let kind = self.kind.type_name();

        match (&self.presence, &self.default) {
            (PresenceRule::Defaulting, None) => {
                bail!("field {:?}: defaulting fields need a default", self.name)
            }
            (PresenceRule::Defaulting, Some(default)) if !self.kind.accepts_default(default) => {
                bail!("field {:?}: default {} does not fit a {} field", self.name, default, kind)
            }
            (PresenceRule::Required | PresenceRule::Optional, Some(_)) => {
                bail!("field {:?}: only defaulting fields take a default", self.name)
            }
            _ => {}
        }

        match &self.kind {
            FieldKind::Integer { min, max, .. } => {
                ensure!(min <= max, "field {:?}: min {} exceeds max {}", self.name, min, max);
            }
            FieldKind::Float { min, max, .. } => {
                ensure!(min <= max, "field {:?}: min {} exceeds max {}", self.name, min, max);
            }
            FieldKind::Radio { options } | FieldKind::Checkboxes { options } => {
                ensure!(!options.is_empty(), "field {:?}: {} needs at least one option", self.name, kind);
            }
            FieldKind::Checkbox { .. } | FieldKind::Text { .. } => {}
        }

        if matches!(self.kind, FieldKind::Checkbox { .. } | FieldKind::Checkboxes { .. }) {
            ensure!(
                self.presence == PresenceRule::Optional,
                "field {:?}: {} fields are always optional",
                self.name,
                kind
            );
        }

        Ok(())
    }

    /// Run this rule's pipeline against `source`
    pub fn run<S: FieldSource + ?Sized>(&self, source: &S) -> Outcome<Value> {
        let name = self.name.as_str();
        let label = self.display_label();

        match &self.kind {
            FieldKind::Text { max_length } => {
                let presence = self.presence_as(|v| v.as_str().map(str::to_string));
                pipeline::text(source, name, label, *max_length, presence).map(Value::Text)
            }
            FieldKind::Integer { max_length, min, max } => {
                let presence = self.presence_as(Value::as_i64);
                pipeline::integer(source, name, label, *max_length, Bounds::new(*min, *max), presence)
                    .map(Value::Integer)
            }
            FieldKind::Float { max_length, min, max } => {
                let presence = self.presence_as(Value::as_f64);
                pipeline::float(source, name, label, *max_length, Bounds::new(*min, *max), presence)
                    .map(Value::Float)
            }
            FieldKind::Radio { options } => {
                let presence = self.presence_as(|v| v.as_str().map(str::to_string));
                pipeline::radio(source, name, label, options.as_slice(), presence).map(Value::Text)
            }
            FieldKind::Checkbox { value } => pipeline::checkbox(source, name, label, value).map(Value::Text),
            FieldKind::Checkboxes { options } => pipeline::checkboxes(source, name, label, options.as_slice()).map(Value::List),
        }
    }

    fn presence_as<T>(&self, extract: impl FnOnce(&Value) -> Option<T>) -> Presence<T> {
        match self.presence {
            PresenceRule::Required => Presence::Required,
            PresenceRule::Optional => Presence::Optional,
            PresenceRule::Defaulting => match self.default.as_ref().and_then(extract) {
                Some(default) => Presence::Defaulting(default),
                None => {
                    tracing::error!(field = %self.name, "unusable default; treating field as optional");
                    Presence::Optional
                }
            },
        }
    }
}

impl FormSchema {
    /// Build a schema from rules, checking every rule
    pub fn new(name: impl Into<String>, fields: Vec<FieldRule>) -> Result<Self> {
        let schema = Self {
            name: name.into(),
            fields,
        };
        schema.check()?;
        Ok(schema)
    }

    /// Parse a schema from TOML text. Empty text gives an empty schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let schema: FormSchema = toml::from_str(content).context("Failed to parse form schema")?;
        schema.check()?;
        Ok(schema)
    }

    /// Load a schema file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form schema: {:?}", path))?;

        let schema = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid form schema: {:?}", path))?;

        tracing::info!(form = %schema.name, fields = schema.fields.len(), "loaded form schema from {:?}", path);
        Ok(schema)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.fields {
            ensure!(seen.insert(rule.name.as_str()), "field {:?} is declared twice", rule.name);
            rule.check()?;
        }
        Ok(())
    }

    /// Validate every field of one submission
    pub fn validate<S: FieldSource + ?Sized>(&self, source: &S) -> Submission {
        let mut submission = Submission::default();

        for rule in &self.fields {
            if let Some(value) = rule.run(source).settle(&rule.name, &mut submission.errors) {
                submission.values.insert(rule.name.clone(), value);
            }
        }

        tracing::debug!(
            form = %self.name,
            values = submission.values.len(),
            errors = submission.errors.len(),
            "form validated"
        );
        submission
    }
}

/// Result of validating a whole form: accepted values plus the error collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submission {
    /// Validated values; optional fields that were not supplied are omitted
    pub values: BTreeMap<String, Value>,
    pub errors: FieldErrors,
}

impl Submission {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn into_result(self) -> std::result::Result<BTreeMap<String, Value>, FieldErrors> {
        if self.errors.is_empty() {
            Ok(self.values)
        } else {
            Err(self.errors)
        }
    }

    /// JSON shape handed to templates: `{"values": {...}, "errors": {...}}`
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schema() {
        let schema = FormSchema::from_toml_str("").unwrap();
        assert!(schema.fields().is_empty());
        assert_eq!(schema.name(), "");
    }

    #[test]
    fn test_parse_field_kinds() {
        let toml = r#"
            name = "order"

            [[fields]]
            name = "qty"
            label = "Quantity"
            presence = "defaulting"
            default = 1
            type = "integer"
            max_length = 3
            min = 1
            max = 100

            [[fields]]
            name = "weight"
            type = "float"
            max_length = 8
            min = 0
            max = 2.5

            [[fields]]
            name = "extras"
            type = "checkboxes"
            options = ["cheese", "ham"]
        "#;

        let schema = FormSchema::from_toml_str(toml).unwrap();
        assert_eq!(schema.name(), "order");

        let qty = schema.field("qty").unwrap();
        assert_eq!(qty.display_label(), "Quantity");
        assert_eq!(qty.presence, PresenceRule::Defaulting);
        assert_eq!(qty.default, Some(Value::Integer(1)));
        assert_eq!(
            qty.kind,
            FieldKind::Integer {
                max_length: 3,
                min: 1,
                max: 100
            }
        );

        let weight = schema.field("weight").unwrap();
        assert_eq!(weight.display_label(), "weight");
        assert_eq!(weight.presence, PresenceRule::Optional);
        assert_eq!(
            weight.kind,
            FieldKind::Float {
                max_length: 8,
                min: 0.0,
                max: 2.5
            }
        );
    }

    #[test]
    fn test_float_default_accepts_integer_literal() {
        let rule = FieldRule::new(
            "ratio",
            FieldKind::Float {
                max_length: 5,
                min: 0.0,
                max: 1.0,
            },
        )
        .defaulting(Value::Integer(1));

        assert!(rule.check().is_ok());
        let empty = crate::FormData::new();
        assert_eq!(rule.run(&empty), Outcome::Valid(Value::Float(1.0)));
    }
}
