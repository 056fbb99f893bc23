// validation.rs
use chrono::{Datelike, Local, NaiveDate};
use lazy_regex::{lazy_regex, Lazy, Regex};
use serde_json::Value;
use thiserror::Error;

use crate::employee::{EmployeeFields, NewEmployee};

static EMAIL_REGEX: Lazy<Regex> = lazy_regex!(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$");
// chrono's %Y also takes signed and wider years; the literal must be YYYY-MM-DD.
static HIRE_DATE_REGEX: Lazy<Regex> = lazy_regex!(r"^\d{4}-\d{1,2}-\d{1,2}$");

const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_HIRE_YEAR: i32 = 1900;

/// A single field failed validation. The message is shown to API callers as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Returns the raw string behind a field, treating `null`, non-strings and
/// empty strings as missing.
fn required_str<'a>(value: Option<&'a Value>, label: &str) -> ValidationResult<&'a str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        _ => Err(ValidationError::new(format!(
            "{} is required and must be a string",
            label
        ))),
    }
}

fn bounded_text(value: Option<&Value>, label: &str, max: usize) -> ValidationResult<String> {
    let trimmed = required_str(value, label)?.trim();
    let len = trimmed.chars().count();
    if len < 2 {
        return Err(ValidationError::new(format!(
            "{} must be at least 2 characters long",
            label
        )));
    }
    if len > max {
        return Err(ValidationError::new(format!(
            "{} must be less than {} characters",
            label, max
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_name(value: Option<&Value>) -> ValidationResult<String> {
    bounded_text(value, "Name", 100)
}

/// Trims and lower-cases the address before matching it.
pub fn validate_email(value: Option<&Value>) -> ValidationResult<String> {
    let email = normalize_email(required_str(value, "Email")?);
    if !EMAIL_REGEX.is_match(&email) {
        return Err(ValidationError::new("Invalid email format"));
    }
    Ok(email)
}

pub fn validate_department(value: Option<&Value>) -> ValidationResult<String> {
    bounded_text(value, "Department", 50)
}

pub fn validate_role(value: Option<&Value>) -> ValidationResult<String> {
    bounded_text(value, "Role", 50)
}

/// Validates a hire date against today's local date.
pub fn validate_hire_date(value: Option<&Value>) -> ValidationResult<String> {
    validate_hire_date_on(value, Local::now().date_naive())
}

/// Validates a hire date against an explicit reference date.
///
/// The literal trimmed string is returned, not the parsed date.
pub fn validate_hire_date_on(value: Option<&Value>, today: NaiveDate) -> ValidationResult<String> {
    let trimmed = required_str(value, "Hire date")?.trim();
    let bad_format = || ValidationError::new("Hire date must be in YYYY-MM-DD format");
    if !HIRE_DATE_REGEX.is_match(trimmed) {
        return Err(bad_format());
    }
    let parsed = NaiveDate::parse_from_str(trimmed, HIRE_DATE_FORMAT).map_err(|_| bad_format())?;
    if parsed > today {
        return Err(ValidationError::new("Hire date cannot be in the future"));
    }
    if parsed.year() < MIN_HIRE_YEAR {
        return Err(ValidationError::new("Hire date must be after 1900"));
    }
    Ok(trimmed.to_string())
}

/// Validates every field of a new record, stopping at the first failure.
pub fn validate_employee(fields: &EmployeeFields) -> ValidationResult<NewEmployee> {
    Ok(NewEmployee {
        name: validate_name(fields.get("name"))?,
        email: validate_email(fields.get("email"))?,
        department: validate_department(fields.get("department"))?,
        role: validate_role(fields.get("role"))?,
        hire_date: validate_hire_date(fields.get("hire_date"))?,
    })
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
