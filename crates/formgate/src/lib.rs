//! # formgate
//!
//! Validate untrusted form submissions and coerce them into typed values,
//! collecting one error message per rejected field.
//!
//! ## Quick Start
//!
//! ```rust
//! use formgate::{FormData, FormValidator};
//!
//! let form = FormData::from_urlencoded("name=+Ada+&age=36&toppings[]=ham").unwrap();
//!
//! let mut check = FormValidator::new(&form);
//! let name = check.required_string("name", "Name", 40);
//! let age = check.required_int("age", "Age", 3, 18, 120);
//! let toppings = check.multiple_checkboxes("toppings", "Toppings", &["ham", "cheese"]);
//!
//! assert_eq!(name.as_deref(), Some("Ada"));
//! assert_eq!(age, Some(36));
//! assert_eq!(toppings, Some(vec!["ham".to_string()]));
//! assert!(check.finish().is_ok());
//! ```
//!
//! ## Schemas
//!
//! Forms can also be described in TOML and validated in one call; see
//! [`FormSchema`].
//!
//! ## Architecture
//!
//! - **`formgate-validation`** - the engine: field sources, the validation
//!   pipeline, [`FormValidator`] and the error collection
//! - **`formgate`** (this crate) - request-body adapters ([`FormData`]) and
//!   declarative schemas, re-exporting the engine

pub mod form_data;
pub mod schema;

// Re-export the engine
pub use formgate_validation as validation;
pub use formgate_validation::{
    Bounds, Control, FieldErrors, FieldSource, FieldValue, FormValidator, Outcome, Presence, RawValue,
    ValidationError, Value,
};

pub use form_data::FormData;
pub use schema::{FieldKind, FieldRule, FormSchema, PresenceRule, Submission};
