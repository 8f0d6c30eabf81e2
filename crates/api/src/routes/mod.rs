pub mod department;
pub mod employee;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /Department                      list, create
/// /Department/{code}               get, update, delete
/// /Department/{code}/Employees     employees in one department
///
/// /Employee                        list, create
/// /Employee/Summary                head count and payroll per department
/// /Employee/{id}                   get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/Department", department::router())
        .nest("/Employee", employee::router())
}
