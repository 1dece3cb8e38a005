use core::str::FromStr;

use serde::{Deserialize, Serialize};

use workforce_core::DomainError;

use crate::permissions::{self, Permission};

/// Role carried by every account and every access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[serde(alias = "ADMIN", alias = "ROLE_ADMIN")]
    Admin,
    #[default]
    #[serde(alias = "USER", alias = "ROLE_USER")]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    /// Permissions granted by this role.
    pub fn permissions(self) -> Vec<Permission> {
        match self {
            Role::Admin => vec![permissions::ALL],
            Role::User => vec![
                permissions::EMPLOYEES_READ,
                permissions::DEPARTMENTS_READ,
                permissions::POSITIONS_READ,
                permissions::DASHBOARD_USER,
                permissions::SEARCH_GLOBAL,
                permissions::TIME_OFF_SUBMIT,
            ],
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" | "ROLE_ADMIN" => Ok(Role::Admin),
            "USER" | "ROLE_USER" => Ok(Role::User),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_original_names() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "Admin");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "User");
    }

    #[test]
    fn accepts_legacy_spellings() {
        for raw in ["\"Admin\"", "\"ADMIN\"", "\"ROLE_ADMIN\""] {
            assert_eq!(serde_json::from_str::<Role>(raw).unwrap(), Role::Admin);
        }
        assert_eq!(serde_json::from_str::<Role>("\"USER\"").unwrap(), Role::User);
        assert_eq!("role_user".parse::<Role>().unwrap(), Role::User);
        assert!("manager".parse::<Role>().is_err());
    }
}
