//! String helpers: trimming and length limits

use crate::errors::ValidationError;

/// Characters stripped from both ends of submitted text. Other Unicode
/// spaces such as U+00A0 are kept; NUL and vertical tab are stripped.
const TRIMMED_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Trim surrounding whitespace; blank input counts as not supplied
pub fn trimmed(raw: &str) -> Option<&str> {
    let text = raw.trim_matches(TRIMMED_CHARS);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Length is measured in bytes of the UTF-8 encoding
pub fn validate_max_length(s: &str, max: usize, label: &str) -> Result<(), ValidationError> {
    if s.len() <= max {
        Ok(())
    } else {
        Err(ValidationError::too_long(label, max))
    }
}
