//! Fixed-width sequential identifiers.
//!
//! Department codes and employee IDs are decimal integers rendered with
//! leading zeros to a fixed width (`"007"`, `"0042"`). A new identifier is
//! always one greater than the largest identifier currently stored, so the
//! sequence is derived from surviving rows rather than from a persistent
//! counter: deleting the highest-numbered record frees its number again.
//!
//! This module only does the arithmetic and formatting. Reading the current
//! maximum and inserting the new row atomically is the store's job.

use crate::error::CoreError;

/// Shape of one identifier family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFormat {
    /// Entity name used in error messages.
    pub entity: &'static str,
    /// Number of decimal digits, zero-padded.
    pub width: u32,
}

/// Department codes: `"001"` through `"999"`.
pub const DEPARTMENT_CODE: CodeFormat = CodeFormat {
    entity: "Department",
    width: 3,
};

/// Employee IDs: `"0001"` through `"9999"`.
pub const EMPLOYEE_ID: CodeFormat = CodeFormat {
    entity: "Employee",
    width: 4,
};

impl CodeFormat {
    /// Largest number representable in this width.
    pub fn capacity(&self) -> i64 {
        10_i64.pow(self.width) - 1
    }

    /// Render `value` zero-padded to the family width.
    ///
    /// Fails with [`CoreError::Conflict`] when `value` needs more digits than
    /// the width allows, and with [`CoreError::Internal`] for values below 1.
    pub fn format(&self, value: i64) -> Result<String, CoreError> {
        if value < 1 {
            return Err(CoreError::Internal(format!(
                "{} identifier must be positive, got {value}",
                self.entity
            )));
        }
        if value > self.capacity() {
            return Err(CoreError::Conflict(format!(
                "{} identifier space exhausted (max {})",
                self.entity,
                self.capacity()
            )));
        }
        Ok(format!("{value:0width$}", width = self.width as usize))
    }

    /// Compute the identifier that follows `current_max`.
    ///
    /// `current_max` is the largest numeric identifier among stored rows, or
    /// `0` for an empty table.
    ///
    /// ```
    /// use personnel_core::ids::{DEPARTMENT_CODE, EMPLOYEE_ID};
    ///
    /// assert_eq!(DEPARTMENT_CODE.next_after(0).unwrap(), "001");
    /// assert_eq!(EMPLOYEE_ID.next_after(41).unwrap(), "0042");
    /// ```
    pub fn next_after(&self, current_max: i64) -> Result<String, CoreError> {
        self.format(current_max.max(0) + 1)
    }

    /// Parse a well-formed identifier (exact width, digits only).
    pub fn parse(&self, code: &str) -> Option<i64> {
        if code.len() != self.width as usize || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        code.parse().ok()
    }

    /// Canonicalize a caller-supplied identifier.
    ///
    /// Accepts unpadded digits (`"7"` becomes `"007"`) so lookups behave the
    /// same whether or not the client kept the leading zeros. Returns `None`
    /// for anything that cannot name a stored row.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > self.width as usize {
            return None;
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: i64 = raw.parse().ok()?;
        self.format(value).ok()
    }
}
