//! Strongly-typed identifiers used across the domain.
//!
//! Directory records use numeric keys because the HTTP surface exposes them
//! as path parameters (`/departments/42`) and the policy layer embeds them
//! verbatim in instance-scoped resource identifiers (`departments:42`).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a department record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(i64);

/// Identifier of an employee record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

macro_rules! impl_i64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = i64::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_i64_newtype!(DepartmentId, "DepartmentId");
impl_i64_newtype!(EmployeeId, "EmployeeId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_id_round_trips_through_display_and_from_str() {
        let id = DepartmentId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<DepartmentId>().unwrap(), id);
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let err = "{department_id}".parse::<EmployeeId>().unwrap_err();
        match err {
            DomainError::InvalidId(_) => {}
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }
}
