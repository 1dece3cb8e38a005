//! Audit trail entries written for every mutating operation.

pub mod entry;

pub use entry::{newest_first, AuditAction, AuditEntry};
