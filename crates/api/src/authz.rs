//! Route-level authorization guards.
//!
//! Permissions are checked here, before a service is called, so the services
//! and domain crates stay auth-agnostic.

use workforce_auth::{authorize, Permission};
use workforce_core::EmployeeId;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn require(principal: &PrincipalContext, permission: &Permission) -> Result<(), ApiError> {
    authorize(principal.principal(), permission).map_err(ApiError::from)
}

/// Holders of `permission` pass; anyone else only for the employee linked to
/// their own account.
pub async fn require_employee_access(
    services: &AppServices,
    principal: &PrincipalContext,
    employee_id: EmployeeId,
    permission: &Permission,
) -> Result<(), ApiError> {
    let Err(denied) = authorize(principal.principal(), permission) else {
        return Ok(());
    };

    let account = services.users.account(principal.user_id()).await?;
    if account.owns_employee(employee_id) {
        Ok(())
    } else {
        Err(denied.into())
    }
}

/// Holders of `permission` pass; anyone else only for their own account.
pub fn require_self_or(
    principal: &PrincipalContext,
    user_id: workforce_core::UserId,
    permission: &Permission,
) -> Result<(), ApiError> {
    if principal.user_id() == user_id {
        return Ok(());
    }
    require(principal, permission)
}
