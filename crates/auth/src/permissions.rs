use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "employees.read"). The wildcard `"*"`
/// grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const ALL: Permission = Permission::from_static("*");

pub const EMPLOYEES_READ: Permission = Permission::from_static("employees.read");
pub const EMPLOYEES_WRITE: Permission = Permission::from_static("employees.write");
pub const DEPARTMENTS_READ: Permission = Permission::from_static("departments.read");
pub const DEPARTMENTS_WRITE: Permission = Permission::from_static("departments.write");
pub const POSITIONS_READ: Permission = Permission::from_static("positions.read");
pub const POSITIONS_WRITE: Permission = Permission::from_static("positions.write");
pub const SALARIES_READ: Permission = Permission::from_static("salaries.read");
pub const SALARIES_WRITE: Permission = Permission::from_static("salaries.write");
pub const CONTRACTS_READ: Permission = Permission::from_static("contracts.read");
pub const CONTRACTS_WRITE: Permission = Permission::from_static("contracts.write");
pub const DOCUMENTS_READ: Permission = Permission::from_static("documents.read");
pub const DOCUMENTS_WRITE: Permission = Permission::from_static("documents.write");
pub const TIME_OFF_READ: Permission = Permission::from_static("time_off.read");
pub const TIME_OFF_SUBMIT: Permission = Permission::from_static("time_off.submit");
pub const TIME_OFF_DECIDE: Permission = Permission::from_static("time_off.decide");
pub const AUDIT_READ: Permission = Permission::from_static("audit.read");
pub const USERS_READ: Permission = Permission::from_static("users.read");
pub const DASHBOARD_ADMIN: Permission = Permission::from_static("dashboard.admin");
pub const DASHBOARD_USER: Permission = Permission::from_static("dashboard.user");
pub const SEARCH_GLOBAL: Permission = Permission::from_static("search.global");
