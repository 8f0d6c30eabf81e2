//! Handlers for `/api/Department`.
//!
//! Path codes are normalized before lookup, so `/api/Department/7` and
//! `/api/Department/007` address the same row.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use personnel_core::ids::DEPARTMENT_CODE;
use personnel_db::models::department::{CreateDepartment, UpdateDepartment};
use personnel_db::repositories::{DepartmentRepo, EmployeeRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Department";

/// Resolve a path code to its canonical form, or 404 if it can never match.
fn canonical_code(raw: &str) -> AppResult<String> {
    DEPARTMENT_CODE
        .normalize(raw)
        .ok_or_else(|| AppError::not_found(ENTITY, raw))
}

/// GET /api/Department
pub async fn list_departments(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(departments))
}

/// POST /api/Department
///
/// The code is allocated server-side; any `departmentCode` in the body is
/// ignored.
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateDepartment>,
) -> AppResult<impl IntoResponse> {
    let department = DepartmentRepo::create(&state.pool, &input, &state.allocation).await?;

    tracing::info!(
        code = %department.code,
        name = %department.name,
        "Department created",
    );

    Ok(Json(department))
}

/// GET /api/Department/{code}
pub async fn get_department(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let code = canonical_code(&code)?;
    let department = DepartmentRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &code))?;

    Ok(Json(department))
}

/// PUT /api/Department/{code}
///
/// Renames the department. The code never changes.
pub async fn update_department(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateDepartment>,
) -> AppResult<impl IntoResponse> {
    let code = canonical_code(&code)?;
    let department = DepartmentRepo::update(&state.pool, &code, &input)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, &code))?;

    tracing::info!(code = %department.code, name = %department.name, "Department updated");

    Ok(Json(department))
}

/// DELETE /api/Department/{code}
///
/// Succeeds whether or not the department existed. Employees referencing
/// the code are left in place.
pub async fn delete_department(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    match DEPARTMENT_CODE.normalize(&code) {
        Some(code) => {
            let removed = DepartmentRepo::delete(&state.pool, &code).await?;
            if removed {
                tracing::info!(%code, "Department deleted");
            } else {
                tracing::debug!(%code, "Delete of unknown department ignored");
            }
        }
        None => tracing::debug!(%code, "Delete of malformed department code ignored"),
    }

    Ok(Json(MessageResponse::new("Department deleted successfully.")))
}

/// GET /api/Department/{code}/Employees
///
/// Employees referencing an existing department, ordered by id.
pub async fn list_department_employees(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let code = canonical_code(&code)?;
    if !DepartmentRepo::exists(&state.pool, &code).await? {
        return Err(AppError::not_found(ENTITY, code));
    }

    let employees = EmployeeRepo::list_by_department(&state.pool, &code).await?;
    Ok(Json(employees))
}
