//! `workforce-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod page;
pub mod text;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    AuditEntryId, ContractId, DepartmentId, DocumentId, EmployeeId, PositionId, SalaryId,
    TimeOffRequestId, UserId,
};
pub use page::{Page, PageRequest};
pub use value_object::{Money, ValueObject};
