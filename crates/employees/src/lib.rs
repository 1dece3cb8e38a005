//! Employee records.
//!
//! Deterministic record rules only; email uniqueness and the existence of the
//! referenced department and position are checked by the service layer.

pub mod employee;

pub use employee::{
    turnover_rate, validate_email, Employee, EmployeeChanges, Gender, NewEmployee,
};
