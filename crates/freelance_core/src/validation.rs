//! Field validation rules shared by models, services and prompt adapters.
//!
//! # Responsibility
//! - Own format checks for email, phone, amount and calendar inputs.
//! - Parse raw prompt strings into typed values before they reach services.
//!
//! # Invariants
//! - Regexes are compiled once per process.
//! - Amount parsers never accept negative, NaN or infinite values.
//! - Calendar dates use the `YYYY-MM-DD` layout everywhere.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{7,15}$").expect("valid phone regex"));

/// Calendar date layout accepted by every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty or whitespace only.
    Required(&'static str),
    /// Client name is already registered.
    DuplicateName(String),
    InvalidEmail(String),
    InvalidPhone(String),
    InvalidAmount(String),
    InvalidDate(String),
    InvalidMonth(String),
    InvalidYear(String),
    /// Value is not one of the accepted choices for an enumerated field.
    UnknownOption { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is required"),
            Self::DuplicateName(name) => write!(f, "client name `{name}` is already registered"),
            Self::InvalidEmail(value) => write!(f, "invalid email `{value}`"),
            Self::InvalidPhone(value) => write!(
                f,
                "invalid phone `{value}` (digits only, 7 to 15 characters)"
            ),
            Self::InvalidAmount(value) => {
                write!(f, "invalid amount `{value}`; expected a non-negative number")
            }
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::InvalidMonth(value) => write!(f, "invalid month `{value}`; expected 1-12"),
            Self::InvalidYear(value) => write!(f, "invalid year `{value}`"),
            Self::UnknownOption { field, value } => write!(f, "unknown {field} `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty or whitespace-only values for a required field.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Checks `value` against `^\S+@\S+\.\S+$`.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

/// Checks `value` is 7 to 15 ASCII digits.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(value.to_string()))
    }
}

/// Checks an already-typed amount is a finite, non-negative number.
pub fn validate_amount(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(value.to_string()))
    }
}

/// Parses a non-negative amount from raw input.
///
/// Surrounding whitespace is ignored; trailing garbage such as `12abc` is
/// rejected rather than truncated.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    validate_amount(value).map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    Ok(value)
}

/// Parses a required `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Parses an optional calendar date; blank input yields `None`.
pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw).map(Some)
}

/// Parses an optional month number in `1..=12`; blank input yields `None`.
pub fn parse_month(raw: &str) -> Result<Option<u32>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(Some(month)),
        _ => Err(ValidationError::InvalidMonth(trimmed.to_string())),
    }
}

/// Parses an optional four-digit-or-less year; blank input yields `None`.
pub fn parse_year(raw: &str) -> Result<Option<i32>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<i32>() {
        Ok(year) if (1..=9999).contains(&year) => Ok(Some(year)),
        _ => Err(ValidationError::InvalidYear(trimmed.to_string())),
    }
}
