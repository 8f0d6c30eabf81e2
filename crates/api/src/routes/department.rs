//! Route definitions for departments, mounted at `/api/Department`.

use axum::routing::get;
use axum::Router;

use crate::handlers::department;
use crate::state::AppState;

/// ```text
/// GET    /                   -> list_departments
/// POST   /                   -> create_department
/// GET    /{code}             -> get_department
/// PUT    /{code}             -> update_department
/// DELETE /{code}             -> delete_department
/// GET    /{code}/Employees   -> list_department_employees
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(department::list_departments).post(department::create_department),
        )
        .route(
            "/{code}",
            get(department::get_department)
                .put(department::update_department)
                .delete(department::delete_department),
        )
        .route(
            "/{code}/Employees",
            get(department::list_department_employees),
        )
}
