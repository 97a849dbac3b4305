//! formgate validation engine
//!
//! Validates and coerces raw, textual form input into typed values while
//! collecting one human-readable message per failed field.
//!
//! Every validator runs the same stages in the same order:
//! extract the field, measure its trimmed length, coerce it to the target
//! type, then check range or membership.
//!
//! ```
//! use std::collections::HashMap;
//! use formgate_validation::FormValidator;
//!
//! let mut input = HashMap::new();
//! input.insert("age".to_string(), " 42 ".to_string());
//!
//! let mut form = FormValidator::new(&input);
//! let age = form.required_int("age", "Age", 3, 1, 120);
//! let nick = form.optional_string("nickname", "Nickname", 20);
//!
//! assert_eq!(age, Some(42));
//! assert_eq!(nick, None);
//! assert!(form.finish().is_ok());
//! ```

pub mod collection;
pub mod errors;
pub mod numeric;
pub mod outcome;
pub mod pipeline;
pub mod source;
pub mod string;
pub mod validator;
pub mod value;

pub use errors::{Control, FieldErrors, ValidationError};
pub use outcome::Outcome;
pub use numeric::Bounds;
pub use pipeline::Presence;
pub use source::{FieldSource, FieldValue, RawValue};
pub use validator::FormValidator;
pub use value::Value;
