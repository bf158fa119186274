//! Postgres-backed directory store.
//!
//! One statement per operation; the employees-then-department cascade is
//! ordered by the caller, matching the in-memory implementation. Schema:
//!
//! ```sql
//! CREATE TABLE departments (
//!     id   BIGSERIAL PRIMARY KEY,
//!     name TEXT NOT NULL
//! );
//! CREATE TABLE employees (
//!     id            BIGSERIAL PRIMARY KEY,
//!     username      TEXT NOT NULL,
//!     name          TEXT NOT NULL,
//!     gender        TEXT NOT NULL,
//!     position      TEXT NOT NULL,
//!     location      TEXT NOT NULL,
//!     start_year    INT  NOT NULL,
//!     hobbies       TEXT NOT NULL,
//!     department_id BIGINT NOT NULL REFERENCES departments (id)
//! );
//! ```

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crewdir_core::{DepartmentId, EmployeeId};

use crate::department::{Department, NewDepartment};
use crate::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::store::{DirectoryStore, StoreError};

/// `DirectoryStore` over a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PgDirectoryStore {
    pool: PgPool,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => {
            tracing::warn!(operation, error = %other, "directory store query failed");
            StoreError::Backend(format!("{operation}: {other}"))
        }
    }
}

fn department_from_row(row: &sqlx::postgres::PgRow) -> Department {
    Department {
        id: DepartmentId::new(row.get::<i64, _>("id")),
        name: row.get("name"),
    }
}

fn employee_from_row(row: &sqlx::postgres::PgRow) -> Employee {
    Employee {
        id: EmployeeId::new(row.get::<i64, _>("id")),
        username: row.get("username"),
        name: row.get("name"),
        gender: row.get("gender"),
        position: row.get("position"),
        location: row.get("location"),
        start_year: row.get("start_year"),
        hobbies: row.get("hobbies"),
        department_id: DepartmentId::new(row.get::<i64, _>("department_id")),
    }
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn create_department(&self, new: NewDepartment) -> Result<Department, StoreError> {
        let row = sqlx::query("INSERT INTO departments (name) VALUES ($1) RETURNING id, name")
            .bind(&new.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create_department", e))?;
        Ok(department_from_row(&row))
    }

    async fn department(&self, id: DepartmentId) -> Result<Option<Department>, StoreError> {
        let row = sqlx::query("SELECT id, name FROM departments WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("department", e))?;
        Ok(row.as_ref().map(department_from_row))
    }

    async fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_departments", e))?;
        Ok(rows.iter().map(department_from_row).collect())
    }

    async fn rename_department(&self, id: DepartmentId, name: String) -> Result<Department, StoreError> {
        let row = sqlx::query("UPDATE departments SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id.as_i64())
            .bind(&name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("rename_department", e))?;
        Ok(department_from_row(&row))
    }

    async fn delete_department(&self, id: DepartmentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_department", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let row = sqlx::query(
            "INSERT INTO employees \
             (username, name, gender, position, location, start_year, hobbies, department_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, username, name, gender, position, location, start_year, hobbies, department_id",
        )
        .bind(&new.username)
        .bind(&new.name)
        .bind(&new.gender)
        .bind(&new.position)
        .bind(&new.location)
        .bind(new.start_year)
        .bind(&new.hobbies)
        .bind(new.department_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_employee", e))?;
        Ok(employee_from_row(&row))
    }

    async fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query(
            "SELECT id, username, name, gender, position, location, start_year, hobbies, department_id \
             FROM employees WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("employee", e))?;
        Ok(row.as_ref().map(employee_from_row))
    }

    async fn update_employee(&self, id: EmployeeId, update: EmployeeUpdate) -> Result<Employee, StoreError> {
        let row = sqlx::query(
            "UPDATE employees \
             SET name = $2, gender = $3, location = $4, start_year = $5, hobbies = $6 \
             WHERE id = $1 \
             RETURNING id, username, name, gender, position, location, start_year, hobbies, department_id",
        )
        .bind(id.as_i64())
        .bind(&update.name)
        .bind(&update.gender)
        .bind(&update.location)
        .bind(update.start_year)
        .bind(&update.hobbies)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_employee", e))?;
        Ok(employee_from_row(&row))
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_employee", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn employees_in(&self, department_id: DepartmentId) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, username, name, gender, position, location, start_year, hobbies, department_id \
             FROM employees WHERE department_id = $1 ORDER BY id",
        )
        .bind(department_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("employees_in", e))?;
        Ok(rows.iter().map(employee_from_row).collect())
    }

    async fn delete_employees_in(&self, department_id: DepartmentId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE department_id = $1")
            .bind(department_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_employees_in", e))?;
        Ok(result.rows_affected())
    }
}
