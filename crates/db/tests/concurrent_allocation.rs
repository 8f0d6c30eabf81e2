//! Concurrent creates must never hand out the same identifier twice.

use std::collections::HashSet;

use futures::future::join_all;
use personnel_core::ids::{DEPARTMENT_CODE, EMPLOYEE_ID};
use personnel_db::allocation::AllocationPolicy;
use personnel_db::models::department::CreateDepartment;
use personnel_db::models::employee::CreateEmployee;
use personnel_db::repositories::{DepartmentRepo, EmployeeRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

const CONCURRENT_CREATES: usize = 25;

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_department_creates_yield_distinct_codes(pool: PgPool) {
    let handles = (0..CONCURRENT_CREATES).map(|i| {
        let pool = pool.clone();
        tokio::spawn(async move {
            DepartmentRepo::create(
                &pool,
                &CreateDepartment {
                    name: format!("Dept {i}"),
                },
                &AllocationPolicy::default(),
            )
            .await
        })
    });

    let codes: Vec<String> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("create failed").code)
        .collect();

    let distinct: HashSet<&String> = codes.iter().collect();
    assert_eq!(distinct.len(), CONCURRENT_CREATES);
    for code in &codes {
        assert!(DEPARTMENT_CODE.parse(code).is_some(), "malformed code {code}");
    }

    let stored = DepartmentRepo::list(&pool).await.unwrap();
    assert_eq!(stored.len(), CONCURRENT_CREATES);
    assert_eq!(stored.last().unwrap().code, format!("{CONCURRENT_CREATES:03}"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_employee_creates_yield_distinct_ids(pool: PgPool) {
    let dept = DepartmentRepo::create(
        &pool,
        &CreateDepartment {
            name: "Finance".to_string(),
        },
        &AllocationPolicy::default(),
    )
    .await
    .unwrap();

    let handles = (0..CONCURRENT_CREATES).map(|i| {
        let pool = pool.clone();
        let department_code = dept.code.clone();
        tokio::spawn(async move {
            EmployeeRepo::create(
                &pool,
                &CreateEmployee {
                    first_name: format!("First{i}"),
                    last_name: "Last".to_string(),
                    email: format!("e{i}@x.com"),
                    date_of_birth: "1985-06-15".to_string(),
                    salary: Some(Decimal::new(40_000 + i as i64, 0)),
                    department_code,
                },
                &AllocationPolicy::default(),
            )
            .await
        })
    });

    let ids: Vec<String> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("create failed").id)
        .collect();

    let distinct: HashSet<&String> = ids.iter().collect();
    assert_eq!(distinct.len(), CONCURRENT_CREATES);
    for id in &ids {
        assert!(EMPLOYEE_ID.parse(id).is_some(), "malformed id {id}");
    }
}
