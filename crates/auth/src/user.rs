//! Login accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workforce_core::text::normalize_email;
use workforce_core::{EmployeeId, Entity, UserId};

use crate::Role;

/// A login account, optionally linked to the employee record with the same email.
///
/// # Invariants
/// - `email` is stored normalized (trimmed, lowercase) and is unique.
/// - `password_hash` is a PHC string; the clear-text password is never kept.
/// - Two-factor login is only enforced when `two_factor_enabled` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub two_factor_secret: Option<String>,
    pub two_factor_enabled: bool,
    pub email_verified: bool,
    pub employee_id: Option<EmployeeId>,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(email: &str, password_hash: String, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            email: normalize_email(email),
            password_hash,
            role,
            two_factor_secret: None,
            two_factor_enabled: false,
            email_verified: false,
            employee_id: None,
            created_at: now,
        }
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email == normalize_email(email)
    }

    pub fn is_linked(&self) -> bool {
        self.employee_id.is_some()
    }

    pub fn link_employee(&mut self, employee_id: EmployeeId) {
        self.employee_id = Some(employee_id);
    }

    /// Whether the account may read records belonging to `employee_id`.
    pub fn owns_employee(&self, employee_id: EmployeeId) -> bool {
        self.employee_id == Some(employee_id)
    }
}

impl Entity for UserAccount {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
