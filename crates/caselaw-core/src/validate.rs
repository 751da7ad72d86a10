//! Client-side checks on raw user input, run before any request is made.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid case ID")]
    InvalidCaseId(String),
    #[error("Invalid year: {0:?} (expected a 4-digit year)")]
    InvalidYear(String),
}

/// Parse a case identifier taken from navigation input (a path segment,
/// a CLI argument, a tapped link).
pub fn parse_case_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidCaseId(raw.to_string()))
}

/// Parse a year filter field. Blank input means no filter.
pub fn parse_year(raw: &str) -> Result<Option<i32>, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidYear(raw.to_string()));
    }
    s.parse()
        .map(Some)
        .map_err(|_| ValidationError::InvalidYear(raw.to_string()))
}
