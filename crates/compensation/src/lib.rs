//! Compensation: salary records and their arithmetic.

pub mod salary;

pub use salary::{total_salary, NewSalary, Salary, SalaryAdjustment, SalaryChanges};
