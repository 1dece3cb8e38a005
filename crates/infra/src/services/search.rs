use std::collections::HashMap;

use serde::Serialize;

use workforce_contracts::Contract;
use workforce_core::text::contains_ignore_case;
use workforce_core::{EmployeeId, Page, PageRequest};
use workforce_employees::Employee;
use workforce_organization::{Department, Position};

use super::employees::EmployeeService;
use super::{AuditTrail, ServiceResult, Stores};

#[derive(Debug, Clone, Serialize)]
pub struct GlobalSearchResults {
    pub employees: Page<Employee>,
    pub departments: Page<Department>,
    pub contracts: Page<Contract>,
    pub positions: Page<Position>,
}

/// Case-insensitive keyword search across record kinds.
#[derive(Clone)]
pub struct SearchService {
    stores: Stores,
    employees: EmployeeService,
}

impl SearchService {
    pub fn new(stores: Stores) -> Self {
        let employees = EmployeeService::new(stores.clone(), AuditTrail::new(stores.audit.clone()));
        Self { stores, employees }
    }

    /// Every kind is paginated with the same request.
    pub async fn global(&self, query: &str, page: PageRequest) -> ServiceResult<GlobalSearchResults> {
        Ok(GlobalSearchResults {
            employees: self.employees(query, page).await?,
            departments: self.departments(query, page).await?,
            contracts: self.contracts(query, page).await?,
            positions: self.positions(query, page).await?,
        })
    }

    pub async fn employees(&self, query: &str, page: PageRequest) -> ServiceResult<Page<Employee>> {
        self.employees.search(query, page).await
    }

    pub async fn departments(&self, query: &str, page: PageRequest) -> ServiceResult<Page<Department>> {
        let query = query.trim();
        let matches = self
            .stores
            .departments
            .list()
            .await?
            .into_iter()
            .filter(|d| d.matches(query))
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    /// Matches the employee's names, the contract type or the status.
    pub async fn contracts(&self, query: &str, page: PageRequest) -> ServiceResult<Page<Contract>> {
        let query = query.trim();
        let names: HashMap<EmployeeId, (String, String)> = self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .map(|e| (e.id, (e.first_name, e.last_name)))
            .collect();

        let matches = self
            .stores
            .contracts
            .list()
            .await?
            .into_iter()
            .filter(|c| {
                contains_ignore_case(c.contract_type.as_str(), query)
                    || contains_ignore_case(c.status.as_str(), query)
                    || names.get(&c.employee_id).is_some_and(|(first, last)| {
                        contains_ignore_case(first, query) || contains_ignore_case(last, query)
                    })
            })
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    pub async fn positions(&self, query: &str, page: PageRequest) -> ServiceResult<Page<Position>> {
        let query = query.trim();
        let matches = self
            .stores
            .positions
            .list()
            .await?
            .into_iter()
            .filter(|p| p.matches(query))
            .collect();
        Ok(Page::from_vec(matches, page))
    }
}
