//! Application services: lookups, cross-record checks, persistence and audit.
//!
//! Every mutation follows the same shape: load what it depends on, validate,
//! apply, persist, then append an audit entry attributed to the acting user.

pub mod accounts;
pub mod audit;
pub mod contracts;
pub mod dashboard;
pub mod departments;
pub mod documents;
pub mod employees;
pub mod positions;
pub mod salaries;
pub mod search;
pub mod time_off;
pub mod users;

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use workforce_audit::{AuditAction, AuditEntry};
use workforce_auth::UserAccount;
use workforce_compensation::Salary;
use workforce_contracts::Contract;
use workforce_core::{DomainError, UserId};
use workforce_employees::Employee;
use workforce_organization::{Department, Position};
use workforce_records::{Document, TimeOffRequest};

use crate::mail::MailError;
use crate::store::{postgres, InMemoryRecordStore, PostgresRecordStore, Record, Store, StoreError};

pub use accounts::{AccountService, AccountSettings, AuthSession, SignupOutcome, SignupRequest};
pub use audit::AuditService;
pub use contracts::ContractService;
pub use dashboard::{AdminSummary, DashboardService, RecentActivities, UpcomingEvents, UserSummary};
pub use departments::DepartmentService;
pub use documents::DocumentService;
pub use employees::{EmployeeService, EmployeeStats};
pub use positions::PositionService;
pub use salaries::SalaryService;
pub use search::{GlobalSearchResults, SearchService};
pub use time_off::TimeOffService;
pub use users::{AccountView, UserProfile, UserService};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Invariant(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvariantViolation(msg) => Self::Invariant(msg),
            DomainError::InvalidId(msg) => Self::Validation(format!("invalid identifier: {msg}")),
        }
    }
}

/// One store per record type.
#[derive(Clone)]
pub struct Stores {
    pub departments: Store<Department>,
    pub positions: Store<Position>,
    pub employees: Store<Employee>,
    pub salaries: Store<Salary>,
    pub contracts: Store<Contract>,
    pub documents: Store<Document>,
    pub time_off: Store<TimeOffRequest>,
    pub audit: Store<AuditEntry>,
    pub accounts: Store<UserAccount>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            departments: Arc::new(InMemoryRecordStore::new()),
            positions: Arc::new(InMemoryRecordStore::new()),
            employees: Arc::new(InMemoryRecordStore::new()),
            salaries: Arc::new(InMemoryRecordStore::new()),
            contracts: Arc::new(InMemoryRecordStore::new()),
            documents: Arc::new(InMemoryRecordStore::new()),
            time_off: Arc::new(InMemoryRecordStore::new()),
            audit: Arc::new(InMemoryRecordStore::new()),
            accounts: Arc::new(InMemoryRecordStore::new()),
        }
    }

    /// Postgres-backed stores sharing one pool. Creates the table if needed.
    pub async fn postgres(pool: PgPool) -> Result<Self, StoreError> {
        postgres::migrate(&pool).await?;
        let pool = Arc::new(pool);
        Ok(Self {
            departments: Arc::new(PostgresRecordStore::new(pool.clone())),
            positions: Arc::new(PostgresRecordStore::new(pool.clone())),
            employees: Arc::new(PostgresRecordStore::new(pool.clone())),
            salaries: Arc::new(PostgresRecordStore::new(pool.clone())),
            contracts: Arc::new(PostgresRecordStore::new(pool.clone())),
            documents: Arc::new(PostgresRecordStore::new(pool.clone())),
            time_off: Arc::new(PostgresRecordStore::new(pool.clone())),
            audit: Arc::new(PostgresRecordStore::new(pool.clone())),
            accounts: Arc::new(PostgresRecordStore::new(pool)),
        })
    }
}

/// Load a record or fail with `NotFound(message)`.
pub(crate) async fn require<T: Record>(
    store: &Store<T>,
    key: impl Into<Uuid>,
    message: impl Into<String>,
) -> ServiceResult<T> {
    store
        .get(key.into())
        .await?
        .ok_or_else(|| ServiceError::NotFound(message.into()))
}

/// Appends audit entries for mutations.
#[derive(Clone)]
pub struct AuditTrail {
    store: Store<AuditEntry>,
}

impl AuditTrail {
    pub fn new(store: Store<AuditEntry>) -> Self {
        Self { store }
    }

    pub async fn record(
        &self,
        actor: UserId,
        action: AuditAction,
        entity_name: &str,
        entity_id: impl Into<Uuid>,
    ) -> ServiceResult<()> {
        let entry = AuditEntry::new(action, entity_name, entity_id, actor, Utc::now());
        tracing::info!(
            action = %entry.action,
            entity = entity_name,
            entity_id = %entry.entity_id,
            actor = %actor,
            "audit"
        );
        self.store.put(&entry).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use workforce_core::{DepartmentId, PositionId, UserId};
    use workforce_employees::{Employee, NewEmployee};
    use workforce_organization::{Department, NewDepartment, NewPosition, Position};

    use super::*;

    pub fn actor() -> UserId {
        UserId::new()
    }

    pub fn new_employee(first: &str, last: &str, email: &str) -> NewEmployee {
        NewEmployee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: None,
            email: email.to_string(),
            phone: None,
            date_of_birth: None,
            hire_date: None,
            probation_end_date: None,
        }
    }

    pub async fn seed_department(stores: &Stores, name: &str) -> Department {
        let dept = Department::create(NewDepartment {
            name: name.to_string(),
            location: Some("HQ".to_string()),
        })
        .unwrap();
        stores.departments.put(&dept).await.unwrap();
        dept
    }

    pub async fn seed_position(stores: &Stores, department_id: DepartmentId, title: &str) -> Position {
        let pos = Position::create(
            department_id,
            NewPosition {
                title: title.to_string(),
                description: None,
                level: None,
            },
        )
        .unwrap();
        stores.positions.put(&pos).await.unwrap();
        pos
    }

    pub async fn seed_employee(
        stores: &Stores,
        department_id: DepartmentId,
        position_id: PositionId,
        email: &str,
    ) -> Employee {
        let emp = Employee::create(department_id, position_id, new_employee("Test", "Person", email)).unwrap();
        stores.employees.put(&emp).await.unwrap();
        emp
    }
}
