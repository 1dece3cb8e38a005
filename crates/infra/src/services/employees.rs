use std::collections::HashMap;

use workforce_audit::AuditAction;
use workforce_core::text::contains_ignore_case;
use workforce_core::{DepartmentId, EmployeeId, Page, PageRequest, PositionId, UserId};
use workforce_employees::{turnover_rate, Employee, EmployeeChanges, NewEmployee};
use workforce_organization::{Department, Position};

use super::{require, AuditTrail, ServiceError, ServiceResult, Stores};

const ENTITY: &str = "Employee";
const NOT_FOUND: &str = "Employee not found";

#[derive(Clone)]
pub struct EmployeeService {
    stores: Stores,
    audit: AuditTrail,
}

/// Headcount figures used by the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct EmployeeStats {
    pub total: u64,
    pub turnover_rate: u32,
}

impl EmployeeService {
    pub fn new(stores: Stores, audit: AuditTrail) -> Self {
        Self { stores, audit }
    }

    pub async fn create(
        &self,
        actor: UserId,
        department_id: DepartmentId,
        position_id: PositionId,
        input: NewEmployee,
    ) -> ServiceResult<Employee> {
        let employee = Employee::create(department_id, position_id, input)?;
        let taken = self
            .stores
            .employees
            .list()
            .await?
            .iter()
            .any(|e| e.email == employee.email);
        if taken {
            return Err(ServiceError::conflict(format!(
                "Employee with email: {} already exists",
                employee.email
            )));
        }
        self.require_placement(department_id, position_id).await?;

        self.stores.employees.put(&employee).await?;
        self.audit.record(actor, AuditAction::Create, ENTITY, employee.id).await?;
        tracing::info!(employee_id = %employee.id, "employee created");
        Ok(employee)
    }

    /// Create in order, stopping at the first failure. Employees created before
    /// the failure are kept.
    pub async fn bulk_create(
        &self,
        actor: UserId,
        department_id: DepartmentId,
        position_id: PositionId,
        inputs: Vec<NewEmployee>,
    ) -> ServiceResult<Vec<Employee>> {
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(self.create(actor, department_id, position_id, input).await?);
        }
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: UserId,
        id: EmployeeId,
        changes: EmployeeChanges,
    ) -> ServiceResult<Employee> {
        let mut employee = require(&self.stores.employees, id, NOT_FOUND).await?;
        employee.apply(changes)?;
        self.stores.employees.put(&employee).await?;
        self.audit.record(actor, AuditAction::Update, ENTITY, id).await?;
        Ok(employee)
    }

    pub async fn transfer(
        &self,
        actor: UserId,
        id: EmployeeId,
        department_id: DepartmentId,
        position_id: PositionId,
    ) -> ServiceResult<Employee> {
        let mut employee = require(&self.stores.employees, id, NOT_FOUND).await?;
        self.require_placement(department_id, position_id).await?;

        employee.transfer(department_id, position_id);
        self.stores.employees.put(&employee).await?;
        self.audit.record(actor, AuditAction::Transfer, ENTITY, id).await?;
        tracing::info!(employee_id = %id, %department_id, %position_id, "employee transferred");
        Ok(employee)
    }

    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<Employee>> {
        Ok(Page::from_vec(self.stores.employees.list().await?, page))
    }

    /// Keyword search over name, email, department name and position title.
    /// An empty term matches every employee.
    pub async fn search(&self, term: &str, page: PageRequest) -> ServiceResult<Page<Employee>> {
        let term = term.trim();
        let departments = self.department_names().await?;
        let positions = self.position_titles().await?;

        let matches = self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .filter(|e| {
                e.matches(term)
                    || departments
                        .get(&e.department_id)
                        .is_some_and(|name| contains_ignore_case(name, term))
                    || positions
                        .get(&e.position_id)
                        .is_some_and(|title| contains_ignore_case(title, term))
            })
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    pub async fn get(&self, id: EmployeeId) -> ServiceResult<Employee> {
        require(&self.stores.employees, id, NOT_FOUND).await
    }

    pub async fn by_department(&self, department_id: DepartmentId) -> ServiceResult<Vec<Employee>> {
        Ok(self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .filter(|e| e.department_id == department_id)
            .collect())
    }

    pub async fn by_position(&self, position_id: PositionId) -> ServiceResult<Vec<Employee>> {
        Ok(self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .filter(|e| e.position_id == position_id)
            .collect())
    }

    /// Employees with dependent pay, contract, document or leave records cannot
    /// be removed. A linked login account is unlinked.
    pub async fn delete(&self, actor: UserId, id: EmployeeId) -> ServiceResult<()> {
        require(&self.stores.employees, id, NOT_FOUND).await?;

        let has_records = self.stores.salaries.list().await?.iter().any(|s| s.employee_id == id)
            || self.stores.contracts.list().await?.iter().any(|c| c.employee_id == id)
            || self.stores.documents.list().await?.iter().any(|d| d.employee_id == id)
            || self.stores.time_off.list().await?.iter().any(|t| t.employee_id == id);
        if has_records {
            return Err(ServiceError::conflict(
                "Employee still has salary, contract, document or time-off records",
            ));
        }

        for mut account in self.stores.accounts.list().await? {
            if account.owns_employee(id) {
                account.employee_id = None;
                self.stores.accounts.put(&account).await?;
            }
        }

        self.stores.employees.remove(id.into()).await?;
        self.audit.record(actor, AuditAction::Delete, ENTITY, id).await?;
        Ok(())
    }

    pub async fn stats(&self) -> ServiceResult<EmployeeStats> {
        let employees = self.stores.employees.list().await?;
        Ok(EmployeeStats {
            total: employees.len() as u64,
            turnover_rate: turnover_rate(&employees),
        })
    }

    async fn require_placement(
        &self,
        department_id: DepartmentId,
        position_id: PositionId,
    ) -> ServiceResult<(Department, Position)> {
        let department = require(&self.stores.departments, department_id, "Department not found").await?;
        let position = require(&self.stores.positions, position_id, "Position not found").await?;
        Ok((department, position))
    }

    async fn department_names(&self) -> ServiceResult<HashMap<DepartmentId, String>> {
        Ok(self
            .stores
            .departments
            .list()
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect())
    }

    async fn position_titles(&self) -> ServiceResult<HashMap<PositionId, String>> {
        Ok(self
            .stores
            .positions
            .list()
            .await?
            .into_iter()
            .map(|p| (p.id, p.title))
            .collect())
    }
}
