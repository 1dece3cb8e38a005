use std::collections::HashSet;

use workforce_audit::AuditAction;
use workforce_compensation::{NewSalary, Salary, SalaryAdjustment, SalaryChanges};
use workforce_core::{DepartmentId, EmployeeId, Money, Page, PageRequest, SalaryId, UserId};

use super::{require, AuditTrail, ServiceError, ServiceResult, Stores};

const ENTITY: &str = "Salary";
const NOT_FOUND: &str = "Salary record not found";

#[derive(Clone)]
pub struct SalaryService {
    stores: Stores,
    audit: AuditTrail,
}

impl SalaryService {
    pub fn new(stores: Stores, audit: AuditTrail) -> Self {
        Self { stores, audit }
    }

    pub async fn create(
        &self,
        actor: UserId,
        employee_id: EmployeeId,
        input: NewSalary,
    ) -> ServiceResult<Salary> {
        require(&self.stores.employees, employee_id, "Employee not found").await?;
        let salary = Salary::create(employee_id, input)?;
        self.stores.salaries.put(&salary).await?;
        self.audit.record(actor, AuditAction::Create, ENTITY, salary.id).await?;
        Ok(salary)
    }

    pub async fn update(
        &self,
        actor: UserId,
        id: SalaryId,
        changes: SalaryChanges,
    ) -> ServiceResult<Salary> {
        let mut salary = require(&self.stores.salaries, id, NOT_FOUND).await?;
        salary.apply(changes)?;
        self.stores.salaries.put(&salary).await?;
        self.audit.record(actor, AuditAction::Update, ENTITY, id).await?;
        Ok(salary)
    }

    /// Adjust the latest salary of each employee. Stops at the first unknown
    /// employee or rejected amount; adjustments already written are kept.
    pub async fn bulk_adjust(
        &self,
        actor: UserId,
        employee_ids: &[EmployeeId],
        adjustment: SalaryAdjustment,
    ) -> ServiceResult<Vec<Salary>> {
        let mut adjusted = Vec::new();
        for &employee_id in employee_ids {
            if self.stores.employees.get(employee_id.into()).await?.is_none() {
                return Err(ServiceError::not_found(format!(
                    "Employee not found: {employee_id}"
                )));
            }

            let Some(mut latest) = self.by_employee(employee_id).await?.into_iter().max_by_key(|s| s.id)
            else {
                tracing::debug!(%employee_id, "no salary to adjust");
                continue;
            };

            latest.adjust(adjustment)?;
            self.stores.salaries.put(&latest).await?;
            self.audit.record(actor, AuditAction::BulkAdjust, ENTITY, latest.id).await?;
            adjusted.push(latest);
        }
        tracing::info!(count = adjusted.len(), "salaries adjusted");
        Ok(adjusted)
    }

    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<Salary>> {
        Ok(Page::from_vec(self.stores.salaries.list().await?, page))
    }

    pub async fn all(&self) -> ServiceResult<Vec<Salary>> {
        Ok(self.stores.salaries.list().await?)
    }

    /// Base salary within `[min, max]`; a missing bound is open.
    pub async fn search(
        &self,
        min: Option<Money>,
        max: Option<Money>,
        page: PageRequest,
    ) -> ServiceResult<Page<Salary>> {
        let matches = self
            .stores
            .salaries
            .list()
            .await?
            .into_iter()
            .filter(|s| min.is_none_or(|m| s.base_salary >= m) && max.is_none_or(|m| s.base_salary <= m))
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    pub async fn get(&self, id: SalaryId) -> ServiceResult<Salary> {
        require(&self.stores.salaries, id, NOT_FOUND).await
    }

    pub async fn by_employee(&self, employee_id: EmployeeId) -> ServiceResult<Vec<Salary>> {
        Ok(self
            .stores
            .salaries
            .list()
            .await?
            .into_iter()
            .filter(|s| s.employee_id == employee_id)
            .collect())
    }

    pub async fn above(&self, threshold: Money) -> ServiceResult<Vec<Salary>> {
        Ok(self
            .stores
            .salaries
            .list()
            .await?
            .into_iter()
            .filter(|s| s.base_salary > threshold)
            .collect())
    }

    /// Mean total salary over the department's employees, `None` without data.
    pub async fn average_for_department(&self, department_id: DepartmentId) -> ServiceResult<Option<Money>> {
        let members: HashSet<EmployeeId> = self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .filter(|e| e.department_id == department_id)
            .map(|e| e.id)
            .collect();

        let salaries = self.stores.salaries.list().await?;
        Ok(Money::average(
            salaries
                .iter()
                .filter(|s| members.contains(&s.employee_id))
                .map(|s| s.total_salary),
        ))
    }

    pub async fn delete(&self, actor: UserId, id: SalaryId) -> ServiceResult<()> {
        require(&self.stores.salaries, id, NOT_FOUND).await?;
        self.stores.salaries.remove(id.into()).await?;
        self.audit.record(actor, AuditAction::Delete, ENTITY, id).await?;
        Ok(())
    }
}
