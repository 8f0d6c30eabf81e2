//! Input validation for department and employee writes.
//!
//! Every check runs before the store touches the database, so a rejected
//! request never leaves a row behind. Failures are reported as
//! [`CoreError::Validation`] naming the offending wire field.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::ids::DEPARTMENT_CODE;

/// Maximum length of a department name.
pub const MAX_DEPARTMENT_NAME_LEN: usize = 100;

/// Maximum length of an employee first or last name.
pub const MAX_PERSON_NAME_LEN: usize = 100;

/// Maximum length of an email address.
pub const MAX_EMAIL_LEN: usize = 254;

/// Largest salary the `NUMERIC(12, 2)` column can hold, in cents.
const MAX_SALARY_CENTS: i128 = 999_999_999_999;

/// Largest salary the `NUMERIC(12, 2)` column can hold: `9999999999.99`.
pub const MAX_SALARY: Decimal = Decimal::from_parts(
    MAX_SALARY_CENTS as u32,
    (MAX_SALARY_CENTS >> 32) as u32,
    (MAX_SALARY_CENTS >> 64) as u32,
    false,
    SALARY_SCALE,
);

/// Decimal places stored for a salary.
pub const SALARY_SCALE: u32 = 2;

/// Earliest year accepted for a date of birth.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Wire format for dates of birth.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Employee fields after validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub salary: Decimal,
    pub department_code: String,
}

/// Raw employee input as received from a caller.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub date_of_birth: &'a str,
    pub salary: Option<Decimal>,
    pub department_code: &'a str,
}

/// Trim `value` and require it to be non-empty and at most `max_len` chars.
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} too long: {len} chars (max {max_len})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a department name, returning the trimmed value.
pub fn validate_department_name(name: &str) -> Result<String, CoreError> {
    validate_required("departmentName", name, MAX_DEPARTMENT_NAME_LEN)
}

/// Salary must be present, non-negative and fit the storage column
/// exactly: more than two significant decimal places is rejected rather
/// than rounded.
pub fn validate_salary(salary: Option<Decimal>) -> Result<Decimal, CoreError> {
    match salary {
        None => Err(CoreError::Validation("salary is required".to_string())),
        Some(value) if value.is_sign_negative() && !value.is_zero() => Err(
            CoreError::Validation(format!("salary must not be negative, got {value}")),
        ),
        Some(value) if value > MAX_SALARY => Err(CoreError::Validation(format!(
            "salary must not exceed {MAX_SALARY}, got {value}"
        ))),
        Some(value) if value.normalize().scale() > SALARY_SCALE => Err(CoreError::Validation(
            format!("salary must have at most {SALARY_SCALE} decimal places, got {value}"),
        )),
        Some(value) => Ok(value),
    }
}

/// Parse a `YYYY-MM-DD` date of birth, accepting years from
/// [`MIN_BIRTH_YEAR`] up to `today`.
pub fn parse_date_of_birth(raw: &str, today: NaiveDate) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::Validation("DOB is required".to_string()));
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("DOB must be a date in YYYY-MM-DD format, got '{raw}'"))
    })?;
    if date > today {
        return Err(CoreError::Validation(format!(
            "DOB must not be in the future, got {date}"
        )));
    }
    if date.year() < MIN_BIRTH_YEAR {
        return Err(CoreError::Validation(format!(
            "DOB must not be before {MIN_BIRTH_YEAR}, got {date}"
        )));
    }
    Ok(date)
}

/// Canonicalize the department reference carried by an employee.
///
/// Only the format is checked here; whether the department exists is
/// verified by the store inside the write transaction.
pub fn validate_department_reference(raw: &str) -> Result<String, CoreError> {
    if raw.trim().is_empty() {
        return Err(CoreError::Validation("departmentCode is required".to_string()));
    }
    DEPARTMENT_CODE.normalize(raw).ok_or_else(|| {
        CoreError::Validation(format!("departmentCode '{raw}' is not a valid department code"))
    })
}

/// Validate a full employee payload.
pub fn validate_employee(
    input: EmployeeInput<'_>,
    today: NaiveDate,
) -> Result<EmployeeFields, CoreError> {
    Ok(EmployeeFields {
        first_name: validate_required("firstName", input.first_name, MAX_PERSON_NAME_LEN)?,
        last_name: validate_required("lastName", input.last_name, MAX_PERSON_NAME_LEN)?,
        email: validate_required("email", input.email, MAX_EMAIL_LEN)?,
        date_of_birth: parse_date_of_birth(input.date_of_birth, today)?,
        salary: validate_salary(input.salary)?,
        department_code: validate_department_reference(input.department_code)?,
    })
}
