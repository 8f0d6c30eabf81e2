//! Department entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `departments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Department {
    #[serde(rename = "departmentCode")]
    pub code: String,
    #[serde(rename = "departmentName")]
    pub name: String,
}

/// DTO for creating a department. The code is always allocated by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDepartment {
    #[serde(default, rename = "departmentName")]
    pub name: String,
}

/// DTO for renaming a department.
///
/// A `departmentCode` in the body is ignored; the path decides which row
/// is updated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartment {
    #[serde(default, rename = "departmentName")]
    pub name: String,
}
