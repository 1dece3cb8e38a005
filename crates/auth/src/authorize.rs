use std::collections::HashSet;

use thiserror::Error;

use crate::{Permission, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Check a single permission against the principal's role grants.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let granted = principal.permissions();
    let perms: HashSet<&str> = granted.iter().map(|p| p.as_str()).collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{permissions, Role};
    use workforce_core::UserId;

    fn principal(role: Role) -> Principal {
        Principal::new(UserId::new(), "someone@example.com", role)
    }

    #[test]
    fn admin_wildcard_grants_everything() {
        let admin = principal(Role::Admin);
        assert!(authorize(&admin, &permissions::SALARIES_WRITE).is_ok());
        assert!(authorize(&admin, &Permission::new("anything.at.all")).is_ok());
    }

    #[test]
    fn user_gets_read_grants_only() {
        let user = principal(Role::User);
        assert!(authorize(&user, &permissions::EMPLOYEES_READ).is_ok());
        assert!(authorize(&user, &permissions::TIME_OFF_SUBMIT).is_ok());
        assert_eq!(
            authorize(&user, &permissions::EMPLOYEES_WRITE),
            Err(AuthzError::Forbidden("employees.write".to_string()))
        );
        assert!(authorize(&user, &permissions::AUDIT_READ).is_err());
    }
}
