//! Employee entity model and DTOs.

use chrono::NaiveDate;
use personnel_core::validation::EmployeeInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `employees` table.
///
/// `DOB` serializes as `YYYY-MM-DD`; `salary` as a JSON number.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Employee {
    #[serde(rename = "employeeID")]
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    #[serde(rename = "departmentCode")]
    pub department_code: String,
}

/// Head count and payroll for one department code.
///
/// `department_name` is `None` when employees still reference a department
/// that has since been deleted.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentHeadcount {
    pub department_code: String,
    pub department_name: Option<String>,
    pub employee_count: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_salary: Decimal,
}

/// DTO for creating an employee. The id is always allocated by the store.
///
/// Fields default to empty so a missing field is reported as a validation
/// error rather than a JSON shape error. `salary` accepts a number or a
/// numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEmployee {
    #[serde(default, rename = "firstName")]
    pub first_name: String,
    #[serde(default, rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "DOB")]
    pub date_of_birth: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default, rename = "departmentCode")]
    pub department_code: String,
}

/// DTO for a full overwrite of an employee's mutable fields.
///
/// An `employeeID` in the body is ignored; the path decides which row is
/// updated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    #[serde(default, rename = "firstName")]
    pub first_name: String,
    #[serde(default, rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "DOB")]
    pub date_of_birth: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default, rename = "departmentCode")]
    pub department_code: String,
}

impl CreateEmployee {
    pub fn as_input(&self) -> EmployeeInput<'_> {
        EmployeeInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            date_of_birth: &self.date_of_birth,
            salary: self.salary,
            department_code: &self.department_code,
        }
    }
}

impl UpdateEmployee {
    pub fn as_input(&self) -> EmployeeInput<'_> {
        EmployeeInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            date_of_birth: &self.date_of_birth,
            salary: self.salary,
            department_code: &self.department_code,
        }
    }
}
