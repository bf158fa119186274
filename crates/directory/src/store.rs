//! Record store abstraction plus the in-memory implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use crewdir_core::{DepartmentId, EmployeeId};

use crate::department::{Department, NewDepartment};
use crate::employee::{Employee, EmployeeUpdate, NewEmployee};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,

    /// The backing storage failed (connection, constraint, poisoned lock).
    #[error("storage failure: {0}")]
    Backend(String),
}

/// Persistence for department and employee records.
///
/// One call per statement; transactional scope (where the backend has one)
/// never spans multiple calls, so callers own multi-step orderings such as
/// the employees-then-department cascade.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn create_department(&self, new: NewDepartment) -> Result<Department, StoreError>;
    async fn department(&self, id: DepartmentId) -> Result<Option<Department>, StoreError>;
    async fn list_departments(&self) -> Result<Vec<Department>, StoreError>;
    async fn rename_department(&self, id: DepartmentId, name: String) -> Result<Department, StoreError>;
    /// Returns true when a record was deleted, false when none existed.
    async fn delete_department(&self, id: DepartmentId) -> Result<bool, StoreError>;

    async fn create_employee(&self, new: NewEmployee) -> Result<Employee, StoreError>;
    async fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;
    async fn update_employee(&self, id: EmployeeId, update: EmployeeUpdate) -> Result<Employee, StoreError>;
    async fn delete_employee(&self, id: EmployeeId) -> Result<bool, StoreError>;

    async fn employees_in(&self, department_id: DepartmentId) -> Result<Vec<Employee>, StoreError>;
    /// Bulk-delete all employees of a department; returns the count removed.
    async fn delete_employees_in(&self, department_id: DepartmentId) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> DirectoryStore for Arc<S>
where
    S: DirectoryStore + ?Sized,
{
    async fn create_department(&self, new: NewDepartment) -> Result<Department, StoreError> {
        (**self).create_department(new).await
    }

    async fn department(&self, id: DepartmentId) -> Result<Option<Department>, StoreError> {
        (**self).department(id).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        (**self).list_departments().await
    }

    async fn rename_department(&self, id: DepartmentId, name: String) -> Result<Department, StoreError> {
        (**self).rename_department(id, name).await
    }

    async fn delete_department(&self, id: DepartmentId) -> Result<bool, StoreError> {
        (**self).delete_department(id).await
    }

    async fn create_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        (**self).create_employee(new).await
    }

    async fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        (**self).employee(id).await
    }

    async fn update_employee(&self, id: EmployeeId, update: EmployeeUpdate) -> Result<Employee, StoreError> {
        (**self).update_employee(id, update).await
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<bool, StoreError> {
        (**self).delete_employee(id).await
    }

    async fn employees_in(&self, department_id: DepartmentId) -> Result<Vec<Employee>, StoreError> {
        (**self).employees_in(department_id).await
    }

    async fn delete_employees_in(&self, department_id: DepartmentId) -> Result<u64, StoreError> {
        (**self).delete_employees_in(department_id).await
    }
}

/// In-memory store for dev/tests.
#[derive(Debug)]
pub struct InMemoryDirectoryStore {
    departments: RwLock<HashMap<DepartmentId, Department>>,
    employees: RwLock<HashMap<EmployeeId, Employee>>,
    next_department: AtomicI64,
    next_employee: AtomicI64,
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self {
            departments: RwLock::new(HashMap::new()),
            employees: RwLock::new(HashMap::new()),
            next_department: AtomicI64::new(1),
            next_employee: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryDirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn create_department(&self, new: NewDepartment) -> Result<Department, StoreError> {
        let id = DepartmentId::new(self.next_department.fetch_add(1, Ordering::SeqCst));
        let dept = Department { id, name: new.name };
        self.departments
            .write()
            .map_err(poisoned)?
            .insert(id, dept.clone());
        Ok(dept)
    }

    async fn department(&self, id: DepartmentId) -> Result<Option<Department>, StoreError> {
        Ok(self.departments.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, StoreError> {
        let mut all: Vec<Department> = self
            .departments
            .read()
            .map_err(poisoned)?
            .values()
            .cloned()
            .collect();
        all.sort_by_key(|d| d.id);
        Ok(all)
    }

    async fn rename_department(&self, id: DepartmentId, name: String) -> Result<Department, StoreError> {
        let mut map = self.departments.write().map_err(poisoned)?;
        let dept = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        dept.name = name;
        Ok(dept.clone())
    }

    async fn delete_department(&self, id: DepartmentId) -> Result<bool, StoreError> {
        Ok(self.departments.write().map_err(poisoned)?.remove(&id).is_some())
    }

    async fn create_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let id = EmployeeId::new(self.next_employee.fetch_add(1, Ordering::SeqCst));
        let emp = Employee {
            id,
            username: new.username,
            name: new.name,
            gender: new.gender,
            position: new.position,
            location: new.location,
            start_year: new.start_year,
            hobbies: new.hobbies,
            department_id: new.department_id,
        };
        self.employees
            .write()
            .map_err(poisoned)?
            .insert(id, emp.clone());
        Ok(emp)
    }

    async fn employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn update_employee(&self, id: EmployeeId, update: EmployeeUpdate) -> Result<Employee, StoreError> {
        let mut map = self.employees.write().map_err(poisoned)?;
        let emp = map.get_mut(&id).ok_or(StoreError::NotFound)?;
        emp.name = update.name;
        emp.gender = update.gender;
        emp.location = update.location;
        emp.start_year = update.start_year;
        emp.hobbies = update.hobbies;
        Ok(emp.clone())
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<bool, StoreError> {
        Ok(self.employees.write().map_err(poisoned)?.remove(&id).is_some())
    }

    async fn employees_in(&self, department_id: DepartmentId) -> Result<Vec<Employee>, StoreError> {
        let mut found: Vec<Employee> = self
            .employees
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|e| e.department_id == department_id)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.id);
        Ok(found)
    }

    async fn delete_employees_in(&self, department_id: DepartmentId) -> Result<u64, StoreError> {
        let mut map = self.employees.write().map_err(poisoned)?;
        let before = map.len();
        map.retain(|_, e| e.department_id != department_id);
        Ok((before - map.len()) as u64)
    }
}
