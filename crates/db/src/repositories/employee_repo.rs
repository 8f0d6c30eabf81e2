//! Repository for the `employees` table.
//!
//! Writes validate the payload, then check the department reference and
//! write the row inside one transaction.

use chrono::{NaiveDate, Utc};
use personnel_core::error::CoreError;
use personnel_core::validation::{self, EmployeeFields};
use sqlx::{PgConnection, PgPool};

use crate::allocation::{self, AllocationPolicy, EMPLOYEES};
use crate::models::employee::{CreateEmployee, DepartmentHeadcount, Employee, UpdateEmployee};
use crate::repositories::DepartmentRepo;
use crate::StoreError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, date_of_birth, salary, department_code";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// List all employees ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY id");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Find an employee by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the employees referencing a department code, ordered by id.
    pub async fn list_by_department(
        pool: &PgPool,
        department_code: &str,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE department_code = $1 ORDER BY id");
        sqlx::query_as::<_, Employee>(&query)
            .bind(department_code)
            .fetch_all(pool)
            .await
    }

    /// Head count and total salary per referenced department code.
    ///
    /// Codes whose department no longer exists are included with no name.
    pub async fn department_summary(pool: &PgPool) -> Result<Vec<DepartmentHeadcount>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentHeadcount>(
            "SELECT e.department_code, d.name AS department_name,
                    COUNT(*) AS employee_count,
                    COALESCE(SUM(e.salary), 0) AS total_salary
             FROM employees e
             LEFT JOIN departments d ON d.code = e.department_code
             GROUP BY e.department_code, d.name
             ORDER BY e.department_code",
        )
        .fetch_all(pool)
        .await
    }

    /// Validate the payload, allocate the next id and insert the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmployee,
        policy: &AllocationPolicy,
    ) -> Result<Employee, StoreError> {
        let fields = validation::validate_employee(input.as_input(), today())?;
        allocation::retry_on_conflict(policy, EMPLOYEES.format.entity, || {
            Self::insert_with_next_id(pool, &fields)
        })
        .await
    }

    async fn insert_with_next_id(pool: &PgPool, fields: &EmployeeFields) -> Result<Employee, StoreError> {
        let mut tx = pool.begin().await?;
        ensure_department(&mut *tx, &fields.department_code).await?;
        let id = allocation::next_code(&mut *tx, &EMPLOYEES).await?;

        let query = format!(
            "INSERT INTO employees
                (id, first_name, last_name, email, date_of_birth, salary, department_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(&id)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(fields.date_of_birth)
            .bind(fields.salary)
            .bind(&fields.department_code)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(employee)
    }

    /// Overwrite every mutable field of an employee. The id never changes.
    ///
    /// Returns `None` if no employee has this id, whatever department the
    /// payload references.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, StoreError> {
        let fields = validation::validate_employee(input.as_input(), today())?;

        let mut tx = pool.begin().await?;
        let target: Option<String> =
            sqlx::query_scalar("SELECT id FROM employees WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if target.is_none() {
            return Ok(None);
        }
        ensure_department(&mut *tx, &fields.department_code).await?;

        let query = format!(
            "UPDATE employees SET
                first_name = $2,
                last_name = $3,
                email = $4,
                date_of_birth = $5,
                salary = $6,
                department_code = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(fields.date_of_birth)
            .bind(fields.salary)
            .bind(&fields.department_code)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(employee)
    }

    /// Permanently delete an employee. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Reject the write unless the referenced department exists.
async fn ensure_department(conn: &mut PgConnection, code: &str) -> Result<(), StoreError> {
    if DepartmentRepo::lock_for_reference(conn, code).await? {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "departmentCode '{code}' does not match an existing department"
        ))
        .into())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
