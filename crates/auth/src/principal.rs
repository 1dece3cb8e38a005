use serde::{Deserialize, Serialize};

use workforce_core::UserId;

use crate::{Permission, Role};

/// An authenticated caller, resolved from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
        }
    }

    pub fn permissions(&self) -> Vec<Permission> {
        self.role.permissions()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
