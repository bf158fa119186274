use serde::{Deserialize, Serialize};

use crewdir_core::{DepartmentId, DomainError, DomainResult, EmployeeId};

/// An employee record. Always belongs to a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub username: String,
    pub name: String,
    pub gender: String,
    pub position: String,
    pub location: String,
    pub start_year: i32,
    pub hobbies: String,
    pub department_id: DepartmentId,
}

/// Fields for an employee about to be created (id is store-assigned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub username: String,
    pub name: String,
    pub gender: String,
    pub position: String,
    pub location: String,
    pub start_year: i32,
    pub hobbies: String,
    pub department_id: DepartmentId,
}

impl NewEmployee {
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("employee username must not be blank"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("employee name must not be blank"));
        }
        Ok(())
    }
}

/// Fields an update may change (the department assignment is fixed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: String,
    pub gender: String,
    pub location: String,
    pub start_year: i32,
    pub hobbies: String,
}

impl EmployeeUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("employee name must not be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee() -> NewEmployee {
        NewEmployee {
            username: "ada".to_string(),
            name: "Ada Lovelace".to_string(),
            gender: "female".to_string(),
            position: "Engineer".to_string(),
            location: "London".to_string(),
            start_year: 2021,
            hobbies: "mathematics".to_string(),
            department_id: DepartmentId::new(1),
        }
    }

    #[test]
    fn valid_employee_passes() {
        assert!(new_employee().validate().is_ok());
    }

    #[test]
    fn blank_username_is_rejected() {
        let mut e = new_employee();
        e.username = "".to_string();
        assert!(matches!(e.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut e = new_employee();
        e.name = "  ".to_string();
        assert!(matches!(e.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_with_blank_name_is_rejected() {
        let update = EmployeeUpdate {
            name: "   ".to_string(),
            gender: "female".to_string(),
            location: "London".to_string(),
            start_year: 2021,
            hobbies: "mathematics".to_string(),
        };
        assert!(matches!(update.validate(), Err(DomainError::Validation(_))));
    }
}
