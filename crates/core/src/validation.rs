//! Field-level checks applied to request payloads before any storage call.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Basic `local@domain.tld` shape: no whitespace, exactly one `@`, and at
/// least one dot in the domain part.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Returns `true` if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate an email address, returning a [`CoreError::Validation`] when it
/// does not match the basic pattern.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid email format".into()))
    }
}

/// Return the trimmed value if it is present and non-blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
