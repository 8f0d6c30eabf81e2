//! Transactional identifier allocation.
//!
//! A new code is `MAX(existing) + 1`, so reading the maximum and inserting
//! the row must happen as one unit. Each allocation runs inside the caller's
//! transaction and first takes a transaction-scoped advisory lock keyed by
//! the identifier family, which serializes concurrent creators of the same
//! entity until commit or rollback. The primary key on the code column still
//! rejects a duplicate outright; such failures, along with serialization
//! failures and deadlocks, are retried a bounded number of times by
//! [`retry_on_conflict`].

use std::future::Future;
use std::time::Duration;

use personnel_core::error::CoreError;
use personnel_core::ids::{CodeFormat, DEPARTMENT_CODE, EMPLOYEE_ID};
use sqlx::PgConnection;

use crate::StoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL SQLSTATE for `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";

/// Where one identifier family is stored and which advisory lock guards it.
#[derive(Debug, Clone, Copy)]
pub struct Sequence {
    pub format: CodeFormat,
    pub table: &'static str,
    pub column: &'static str,
    pub lock_key: i64,
}

/// Department codes in `departments.code`.
pub const DEPARTMENTS: Sequence = Sequence {
    format: DEPARTMENT_CODE,
    table: "departments",
    column: "code",
    lock_key: 0x0044_4550_5443_4F44, // "DEPTCOD"
};

/// Employee IDs in `employees.id`.
pub const EMPLOYEES: Sequence = Sequence {
    format: EMPLOYEE_ID,
    table: "employees",
    column: "id",
    lock_key: 0x0045_4D50_4C4F_4944, // "EMPLOID"
};

/// Bounds on how hard a create tries before giving up.
#[derive(Debug, Clone)]
pub struct AllocationPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; grows linearly per attempt.
    pub backoff: Duration,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_millis(20),
        }
    }
}

/// Lock the sequence for the rest of the transaction and compute the next
/// identifier from the surviving rows.
///
/// `conn` must be inside a transaction; the lock is released when it ends.
pub async fn next_code(conn: &mut PgConnection, sequence: &Sequence) -> Result<String, StoreError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(sequence.lock_key)
        .execute(&mut *conn)
        .await?;

    let query = format!(
        "SELECT COALESCE(MAX(CAST({column} AS BIGINT)), 0) FROM {table}",
        column = sequence.column,
        table = sequence.table,
    );
    let current_max: i64 = sqlx::query_scalar(&query).fetch_one(&mut *conn).await?;

    Ok(sequence.format.next_after(current_max)?)
}

/// Whether a database error is worth another allocation attempt.
pub fn is_retryable(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => matches!(
            db_err.code().as_deref(),
            Some(UNIQUE_VIOLATION | SERIALIZATION_FAILURE | DEADLOCK_DETECTED)
        ),
        _ => false,
    }
}

/// Run `attempt` until it succeeds, fails for a non-retryable reason, or the
/// policy's attempt budget is spent.
///
/// Exhausting the budget yields [`CoreError::Transient`].
pub async fn retry_on_conflict<T, F, Fut>(
    policy: &AllocationPolicy,
    entity: &'static str,
    mut attempt: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut tries = 1;
    loop {
        match attempt().await {
            Err(StoreError::Database(err)) if is_retryable(&err) => {
                if tries >= max_attempts {
                    tracing::warn!(entity, attempts = tries, error = %err, "Identifier allocation retries exhausted");
                    return Err(StoreError::Core(CoreError::Transient(format!(
                        "could not allocate a {entity} identifier after {tries} attempts"
                    ))));
                }
                tracing::debug!(entity, attempt = tries, error = %err, "Retrying identifier allocation");
                tokio::time::sleep(policy.backoff * tries).await;
                tries += 1;
            }
            other => return other,
        }
    }
}
