//! Aggregated views for the admin and employee dashboards.

use std::cmp::Reverse;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use workforce_audit::AuditEntry;
use workforce_auth::UserAccount;
use workforce_compensation::Salary;
use workforce_contracts::{Contract, EXPIRY_WINDOW_DAYS};
use workforce_core::DepartmentId;
use workforce_employees::{turnover_rate, Employee};
use workforce_organization::Department;

use super::audit::AuditService;
use super::{ServiceResult, Stores};

const RECENT_HIRES: usize = 5;
const RECENT_AUDIT_ENTRIES: usize = 10;
const RECENT_CONTRACTS: usize = 10;
const NOT_LINKED_MESSAGE: &str = "Your account is not linked to an employee record. Please contact HR if you believe this is an error.";

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentHeadcount {
    pub department_id: DepartmentId,
    pub department_name: String,
    pub employees: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub total_employees: u64,
    pub total_departments: u64,
    pub active_contracts: u64,
    pub recent_hires: Vec<Employee>,
    pub department_distribution: Vec<DepartmentHeadcount>,
    pub upcoming_expirations: Vec<Contract>,
    pub turnover_rate: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserSummary {
    pub linked_to_employee: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_contract: Option<Contract>,
    pub salary_history: Vec<Salary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    pub department_colleagues: Vec<Employee>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentActivities {
    pub recent_audit_entries: Vec<AuditEntry>,
    pub recent_hires: Vec<Employee>,
    pub recent_contract_changes: Vec<Contract>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingEvents {
    pub contract_expirations: Vec<Contract>,
    pub probation_endings: Vec<Employee>,
}

#[derive(Clone)]
pub struct DashboardService {
    stores: Stores,
    audit: AuditService,
}

impl DashboardService {
    pub fn new(stores: Stores) -> Self {
        let audit = AuditService::new(stores.clone());
        Self { stores, audit }
    }

    pub async fn admin_summary(&self, today: NaiveDate) -> ServiceResult<AdminSummary> {
        let employees = self.stores.employees.list().await?;
        let departments = self.stores.departments.list().await?;
        let contracts = self.stores.contracts.list().await?;

        let department_distribution = departments
            .iter()
            .map(|d| DepartmentHeadcount {
                department_id: d.id,
                department_name: d.name.clone(),
                employees: employees.iter().filter(|e| e.department_id == d.id).count() as u64,
            })
            .collect();

        Ok(AdminSummary {
            total_employees: employees.len() as u64,
            total_departments: departments.len() as u64,
            active_contracts: contracts.iter().filter(|c| c.is_active()).count() as u64,
            recent_hires: recent_hires(&employees),
            department_distribution,
            upcoming_expirations: contracts
                .into_iter()
                .filter(|c| c.ends_within_window(today))
                .collect(),
            turnover_rate: turnover_rate(&employees),
        })
    }

    /// Summary for the caller's own employee record. An unlinked account is
    /// linked to the employee sharing its email when one exists.
    pub async fn user_summary(&self, account: &UserAccount) -> ServiceResult<UserSummary> {
        let employee = match account.employee_id {
            Some(id) => self.stores.employees.get(id.into()).await?,
            None => self.link_by_email(account).await?,
        };
        let Some(employee) = employee else {
            return Ok(UserSummary {
                linked_to_employee: false,
                message: Some(NOT_LINKED_MESSAGE.to_string()),
                ..Default::default()
            });
        };

        let current_contract = self
            .stores
            .contracts
            .list()
            .await?
            .into_iter()
            .filter(|c| c.employee_id == employee.id && c.is_active())
            .max_by_key(|c| c.start_date);
        let salary_history = self
            .stores
            .salaries
            .list()
            .await?
            .into_iter()
            .filter(|s| s.employee_id == employee.id)
            .collect();
        let department = self.stores.departments.get(employee.department_id.into()).await?;
        let department_colleagues = self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .filter(|e| e.department_id == employee.department_id)
            .collect();

        Ok(UserSummary {
            linked_to_employee: true,
            message: None,
            employee: Some(employee),
            current_contract,
            salary_history,
            department,
            department_colleagues,
        })
    }

    pub async fn recent_activities(&self) -> ServiceResult<RecentActivities> {
        let employees = self.stores.employees.list().await?;
        let mut contracts = self.stores.contracts.list().await?;
        contracts.sort_by_key(|c| Reverse(c.start_date));
        contracts.truncate(RECENT_CONTRACTS);

        Ok(RecentActivities {
            recent_audit_entries: self.audit.recent(RECENT_AUDIT_ENTRIES).await?,
            recent_hires: recent_hires(&employees),
            recent_contract_changes: contracts,
        })
    }

    /// Contract ends and probation ends within `[today, today + 30 days]`.
    pub async fn upcoming_events(&self, today: NaiveDate) -> ServiceResult<UpcomingEvents> {
        let horizon = today
            .checked_add_days(Days::new(EXPIRY_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MAX);

        let contract_expirations = self
            .stores
            .contracts
            .list()
            .await?
            .into_iter()
            .filter(|c| c.ends_within_window(today))
            .collect();
        let probation_endings = self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .filter(|e| e.probation_end_date.is_some_and(|d| d >= today && d <= horizon))
            .collect();

        Ok(UpcomingEvents {
            contract_expirations,
            probation_endings,
        })
    }

    async fn link_by_email(&self, account: &UserAccount) -> ServiceResult<Option<Employee>> {
        let found = self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .find(|e| e.has_email(&account.email));
        if let Some(employee) = &found {
            let mut linked = account.clone();
            linked.link_employee(employee.id);
            self.stores.accounts.put(&linked).await?;
            tracing::info!(user_id = %account.id, employee_id = %employee.id, "account linked to employee");
        }
        Ok(found)
    }
}

/// Latest hire dates first; employees without one come last.
fn recent_hires(employees: &[Employee]) -> Vec<Employee> {
    let mut hires = employees.to_vec();
    hires.sort_by_key(|e| Reverse(e.hire_date));
    hires.truncate(RECENT_HIRES);
    hires
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use workforce_auth::Role;
    use workforce_contracts::{ContractType, NewContract};
    use workforce_employees::EmployeeChanges;

    use super::*;
    use crate::services::testing::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn contract(stores: &Stores, employee: &Employee, start: NaiveDate, end: Option<NaiveDate>) -> Contract {
        let c = Contract::create(
            employee.id,
            NewContract {
                contract_type: ContractType::FullTime,
                start_date: start,
                end_date: end,
                status: None,
            },
        )
        .unwrap();
        stores.contracts.put(&c).await.unwrap();
        c
    }

    #[tokio::test]
    async fn admin_summary_counts() {
        let stores = Stores::in_memory();
        let today = day(2024, 6, 1);
        let eng = seed_department(&stores, "Engineering").await;
        let ops = seed_department(&stores, "Ops").await;
        let pos = seed_position(&stores, eng.id, "Dev").await;

        let mut staff = Vec::new();
        for i in 0..7u32 {
            let mut emp = seed_employee(&stores, eng.id, pos.id, &format!("e{i}@example.com")).await;
            emp.apply(EmployeeChanges {
                hire_date: Some(day(2020, 1, 1 + i)),
                ..Default::default()
            })
            .unwrap();
            stores.employees.put(&emp).await.unwrap();
            staff.push(emp);
        }
        contract(&stores, &staff[0], day(2023, 1, 1), Some(today)).await;
        contract(&stores, &staff[1], day(2023, 1, 1), Some(day(2024, 7, 1))).await;
        contract(&stores, &staff[2], day(2023, 1, 1), Some(day(2024, 7, 2))).await;

        let summary = DashboardService::new(stores).admin_summary(today).await.unwrap();
        assert_eq!(summary.total_employees, 7);
        assert_eq!(summary.total_departments, 2);
        assert_eq!(summary.active_contracts, 3);
        assert_eq!(summary.recent_hires.len(), 5);
        assert_eq!(summary.recent_hires[0].hire_date, Some(day(2020, 1, 7)));
        assert_eq!(summary.upcoming_expirations.len(), 2);
        let ops_count = summary
            .department_distribution
            .iter()
            .find(|d| d.department_id == ops.id)
            .map(|d| d.employees);
        assert_eq!(ops_count, Some(0));
    }

    #[tokio::test]
    async fn user_summary_links_by_email() {
        let stores = Stores::in_memory();
        let dept = seed_department(&stores, "Engineering").await;
        let pos = seed_position(&stores, dept.id, "Dev").await;
        let emp = seed_employee(&stores, dept.id, pos.id, "me@example.com").await;
        seed_employee(&stores, dept.id, pos.id, "mate@example.com").await;
        contract(&stores, &emp, day(2023, 1, 1), None).await;

        let account = UserAccount::new("me@example.com", "hash".to_string(), Role::User, Utc::now());
        stores.accounts.put(&account).await.unwrap();

        let summary = DashboardService::new(stores.clone()).user_summary(&account).await.unwrap();
        assert!(summary.linked_to_employee);
        assert_eq!(summary.employee.map(|e| e.id), Some(emp.id));
        assert!(summary.current_contract.is_some());
        assert_eq!(summary.department_colleagues.len(), 2);

        let stored = stores.accounts.get(account.id.into()).await.unwrap().unwrap();
        assert!(stored.owns_employee(emp.id));
    }

    #[tokio::test]
    async fn user_summary_without_employee() {
        let stores = Stores::in_memory();
        let account = UserAccount::new("nobody@example.com", "hash".to_string(), Role::User, Utc::now());

        let summary = DashboardService::new(stores).user_summary(&account).await.unwrap();
        assert!(!summary.linked_to_employee);
        assert_eq!(summary.message.as_deref(), Some(NOT_LINKED_MESSAGE));
    }

    #[tokio::test]
    async fn upcoming_events_window_is_inclusive() {
        let stores = Stores::in_memory();
        let today = day(2024, 6, 1);
        let dept = seed_department(&stores, "Engineering").await;
        let pos = seed_position(&stores, dept.id, "Dev").await;
        let mut emp = seed_employee(&stores, dept.id, pos.id, "p@example.com").await;
        emp.probation_end_date = Some(day(2024, 7, 1));
        stores.employees.put(&emp).await.unwrap();
        contract(&stores, &emp, day(2023, 1, 1), Some(today)).await;
        contract(&stores, &emp, day(2023, 1, 1), Some(day(2024, 5, 31))).await;

        let events = DashboardService::new(stores).upcoming_events(today).await.unwrap();
        assert_eq!(events.contract_expirations.len(), 1);
        assert_eq!(events.probation_endings.len(), 1);
    }
}
