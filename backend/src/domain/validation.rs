//! Field checks shared by feature services.
//!
//! Each helper returns an `invalid_request` [`Error`] naming the offending
//! field so handlers can fold it straight into a 400 envelope.

use crate::domain::Error;

/// Trim `value` and reject it when nothing is left.
pub(crate) fn required_text(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional value, treating blank input as absent.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Normalise an email address to lower case and check its basic shape.
pub(crate) fn email(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = required_text(field, value)?;
    let well_formed = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed || trimmed.chars().any(char::is_whitespace) {
        return Err(Error::invalid_request(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(trimmed.to_lowercase())
}

/// Reject non-positive identifiers before they reach storage.
pub(crate) fn positive_id(field: &str, value: i64) -> Result<i64, Error> {
    if value <= 0 {
        return Err(Error::invalid_request(format!(
            "{field} must be a positive identifier"
        )));
    }
    Ok(value)
}
