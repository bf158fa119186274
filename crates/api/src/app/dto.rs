//! Request/response DTOs and JSON mapping.

use serde::{Deserialize, Serialize};

use crewdir_core::DepartmentId;
use crewdir_directory::{Department, Employee};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub username: String,
    pub name: String,
    pub gender: String,
    pub position: String,
    pub location: String,
    pub start_year: i32,
    pub hobbies: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: String,
    pub gender: String,
    pub location: String,
    pub start_year: i32,
    pub hobbies: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

// -------------------------
// Response documents
// -------------------------

/// Home view: all departments plus drained flash notices.
#[derive(Debug, Serialize)]
pub struct HomeDocument {
    pub departments: Vec<Department>,
    pub notices: Vec<String>,
}

/// Department view: the record and its employees.
#[derive(Debug, Serialize)]
pub struct DepartmentDocument {
    pub department: Department,
    pub employees: Vec<Employee>,
}
