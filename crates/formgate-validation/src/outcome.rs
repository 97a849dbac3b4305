//! Tagged result of validating one field

use crate::errors::{FieldErrors, ValidationError};

/// What one pipeline run produced for one field
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    /// Supplied, coerced and within constraints (or a trusted default)
    Valid(T),
    /// Not supplied, and absence is acceptable for this field
    Absent,
    /// Supplied but rejected, or required and missing
    Invalid(ValidationError),
}

impl<T> Outcome<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Outcome::Absent)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid(_))
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Outcome::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// The value, discarding absence and failure alike
    pub fn valid(self) -> Option<T> {
        match self {
            Outcome::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Valid(value) => Outcome::Valid(f(value)),
            Outcome::Absent => Outcome::Absent,
            Outcome::Invalid(error) => Outcome::Invalid(error),
        }
    }

    /// Chain a further check onto a valid value
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, ValidationError>) -> Outcome<U> {
        match self {
            Outcome::Valid(value) => f(value).into(),
            Outcome::Absent => Outcome::Absent,
            Outcome::Invalid(error) => Outcome::Invalid(error),
        }
    }

    /// Write a failure into `errors` under `field` and hand back the value, if any.
    pub fn settle(self, field: &str, errors: &mut FieldErrors) -> Option<T> {
        match self {
            Outcome::Valid(value) => Some(value),
            Outcome::Absent => {
                tracing::trace!(field, "field not supplied");
                None
            }
            Outcome::Invalid(error) => {
                tracing::debug!(field, error = %error, "field rejected");
                errors.record(field, &error);
                None
            }
        }
    }
}

impl<T> From<Result<T, ValidationError>> for Outcome<T> {
    fn from(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(value) => Outcome::Valid(value),
            Err(error) => Outcome::Invalid(error),
        }
    }
}
