use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use workforce_auth::{Role, UserAccount};
use workforce_core::text::normalize_email;
use workforce_core::{EmployeeId, UserId};
use workforce_employees::Gender;
use workforce_organization::{Department, Position};

use super::{require, ServiceError, ServiceResult, Stores};

const NOT_FOUND: &str = "User not found";

/// An account as exposed over the API: no password hash, no TOTP secret.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub two_factor_enabled: bool,
    pub email_verified: bool,
    pub employee_id: Option<EmployeeId>,
    pub created_at: DateTime<Utc>,
}

impl From<UserAccount> for AccountView {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
            two_factor_enabled: account.two_factor_enabled,
            email_verified: account.email_verified,
            employee_id: account.employee_id,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfile {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub department: Option<Department>,
    pub position: Option<Position>,
}

#[derive(Clone)]
pub struct UserService {
    stores: Stores,
}

impl UserService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn list(&self) -> ServiceResult<Vec<AccountView>> {
        Ok(self
            .stores
            .accounts
            .list()
            .await?
            .into_iter()
            .map(AccountView::from)
            .collect())
    }

    pub async fn get(&self, id: UserId) -> ServiceResult<AccountView> {
        Ok(self.account(id).await?.into())
    }

    /// Full account record, for callers that need the linked employee.
    pub async fn account(&self, id: UserId) -> ServiceResult<UserAccount> {
        require(&self.stores.accounts, id, NOT_FOUND).await
    }

    pub async fn by_email(&self, email: &str) -> ServiceResult<AccountView> {
        let email = normalize_email(email);
        self.stores
            .accounts
            .list()
            .await?
            .into_iter()
            .find(|a| a.has_email(&email))
            .map(AccountView::from)
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
    }

    /// Email plus the linked employee's personal and placement details.
    pub async fn profile(&self, id: UserId) -> ServiceResult<UserProfile> {
        let account = self.account(id).await?;
        let mut profile = UserProfile {
            email: account.email.clone(),
            ..Default::default()
        };

        let employee = match account.employee_id {
            Some(employee_id) => self.stores.employees.get(employee_id.into()).await?,
            None => None,
        };
        if let Some(employee) = employee {
            profile.department = self.stores.departments.get(employee.department_id.into()).await?;
            profile.position = self.stores.positions.get(employee.position_id.into()).await?;
            profile.first_name = Some(employee.first_name);
            profile.last_name = Some(employee.last_name);
            profile.phone = employee.phone;
            profile.date_of_birth = employee.date_of_birth;
            profile.gender = employee.gender;
        }
        Ok(profile)
    }
}
