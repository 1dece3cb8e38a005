//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers deterministic record-level failures (validation, date ordering,
/// bad identifiers). Lookups and uniqueness checks that need storage are
/// reported by the service layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank name, malformed email).
    #[error("{0}")]
    Validation(String),

    /// A record-level invariant was violated (e.g. end date before start date).
    #[error("{0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Reject blank (empty or whitespace-only) text.
    pub fn require_text(field: &str, value: &str) -> DomainResult<()> {
        if value.trim().is_empty() {
            return Err(Self::validation(format!("{field} cannot be empty")));
        }
        Ok(())
    }
}
