use serde::{Deserialize, Serialize};

use crewdir_core::{DepartmentId, DomainError, DomainResult};

/// A department record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

/// Fields for a department about to be created (id is store-assigned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
}

impl NewDepartment {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("department name must not be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let err = NewDepartment {
            name: "   ".to_string(),
        }
        .validate()
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_blank_name_is_accepted() {
        assert!(NewDepartment {
            name: "Engineering".to_string()
        }
        .validate()
        .is_ok());
    }
}
