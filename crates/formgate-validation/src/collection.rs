//! Membership checks against a legal value set

/// Enum/value restriction
pub fn is_one_of<L: AsRef<str>>(value: &str, legal: &[L]) -> bool {
    legal.iter().any(|allowed| allowed.as_ref() == value)
}

/// First submitted value that is not in `legal`, in submission order
pub fn first_illegal<'a, L: AsRef<str>>(values: &'a [String], legal: &[L]) -> Option<&'a str> {
    values
        .iter()
        .map(String::as_str)
        .find(|value| !is_one_of(value, legal))
}
