//! Repository for the `departments` table.

use personnel_core::validation;
use sqlx::{PgConnection, PgPool};

use crate::allocation::{self, AllocationPolicy, DEPARTMENTS};
use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::StoreError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "code, name";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// List all departments ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY code");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// Find a department by its code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE code = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Whether a department with this code exists.
    pub async fn exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM departments WHERE code = $1)")
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// Check that `code` exists and hold a key-share lock on it until the
    /// surrounding transaction ends, so the department cannot be deleted
    /// between the check and the employee write that depends on it.
    pub async fn lock_for_reference(conn: &mut PgConnection, code: &str) -> Result<bool, sqlx::Error> {
        let row: Option<String> =
            sqlx::query_scalar("SELECT code FROM departments WHERE code = $1 FOR KEY SHARE")
                .bind(code)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(row.is_some())
    }

    /// Validate the name, allocate the next code and insert the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDepartment,
        policy: &AllocationPolicy,
    ) -> Result<Department, StoreError> {
        let name = validation::validate_department_name(&input.name)?;
        allocation::retry_on_conflict(policy, DEPARTMENTS.format.entity, || {
            Self::insert_with_next_code(pool, &name)
        })
        .await
    }

    async fn insert_with_next_code(pool: &PgPool, name: &str) -> Result<Department, StoreError> {
        let mut tx = pool.begin().await?;
        let code = allocation::next_code(&mut *tx, &DEPARTMENTS).await?;

        let query = format!("INSERT INTO departments (code, name) VALUES ($1, $2) RETURNING {COLUMNS}");
        let department = sqlx::query_as::<_, Department>(&query)
            .bind(&code)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(department)
    }

    /// Rename a department. The code never changes.
    ///
    /// Returns `None` if no department has this code.
    pub async fn update(
        pool: &PgPool,
        code: &str,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, StoreError> {
        let name = validation::validate_department_name(&input.name)?;
        let query = format!("UPDATE departments SET name = $2 WHERE code = $1 RETURNING {COLUMNS}");
        let department = sqlx::query_as::<_, Department>(&query)
            .bind(code)
            .bind(&name)
            .fetch_optional(pool)
            .await?;
        Ok(department)
    }

    /// Permanently delete a department. Returns `true` if a row was removed.
    ///
    /// Employees referencing the code are left as they are.
    pub async fn delete(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE code = $1")
            .bind(code)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
