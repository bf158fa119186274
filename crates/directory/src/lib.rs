//! `crewdir-directory` — department/employee records and their store.
//!
//! Plain relational-style storage behind a trait: an in-memory map for
//! dev/tests and a Postgres implementation behind the `postgres` feature.

pub mod department;
pub mod employee;
pub mod store;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use department::{Department, NewDepartment};
pub use employee::{Employee, EmployeeUpdate, NewEmployee};
pub use store::{DirectoryStore, InMemoryDirectoryStore, StoreError};

#[cfg(feature = "postgres")]
pub use postgres::PgDirectoryStore;
