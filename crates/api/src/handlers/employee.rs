//! Handlers for `/api/Employee`.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use personnel_core::ids::EMPLOYEE_ID;
use personnel_db::models::employee::{CreateEmployee, UpdateEmployee};
use personnel_db::repositories::EmployeeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Employee";

fn canonical_id(raw: &str) -> AppResult<String> {
    EMPLOYEE_ID
        .normalize(raw)
        .ok_or_else(|| AppError::not_found(ENTITY, raw))
}

/// GET /api/Employee
pub async fn list_employees(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(employees))
}

/// POST /api/Employee
///
/// The id is allocated server-side. The referenced department must exist.
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::create(&state.pool, &input, &state.allocation).await?;

    tracing::info!(
        id = %employee.id,
        department_code = %employee.department_code,
        "Employee created",
    );

    Ok(Json(employee))
}

/// GET /api/Employee/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = canonical_id(&id)?;
    let employee = EmployeeRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;

    Ok(Json(employee))
}

/// PUT /api/Employee/{id}
///
/// Overwrites every mutable field. The id never changes.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateEmployee>,
) -> AppResult<impl IntoResponse> {
    let id = canonical_id(&id)?;
    let employee = EmployeeRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &id))?;

    tracing::info!(
        id = %employee.id,
        department_code = %employee.department_code,
        "Employee updated",
    );

    Ok(Json(employee))
}

/// DELETE /api/Employee/{id}
///
/// Succeeds whether or not the employee existed.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    match EMPLOYEE_ID.normalize(&id) {
        Some(id) => {
            if EmployeeRepo::delete(&state.pool, &id).await? {
                tracing::info!(%id, "Employee deleted");
            } else {
                tracing::debug!(%id, "Delete of unknown employee ignored");
            }
        }
        None => tracing::debug!(%id, "Delete of malformed employee id ignored"),
    }

    Ok(Json(MessageResponse::new("Employee deleted successfully.")))
}

/// GET /api/Employee/Summary
///
/// Head count and total salary per department code.
pub async fn department_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summary = EmployeeRepo::department_summary(&state.pool).await?;
    Ok(Json(summary))
}
