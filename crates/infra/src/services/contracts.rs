use chrono::NaiveDate;
use workforce_audit::AuditAction;
use workforce_contracts::{Contract, ContractStatus, ContractType, NewContract};
use workforce_core::{ContractId, EmployeeId, Page, PageRequest, UserId};

use super::{require, AuditTrail, ServiceResult, Stores};

const ENTITY: &str = "Contract";
const NOT_FOUND: &str = "Contract not found";

#[derive(Clone)]
pub struct ContractService {
    stores: Stores,
    audit: AuditTrail,
}

impl ContractService {
    pub fn new(stores: Stores, audit: AuditTrail) -> Self {
        Self { stores, audit }
    }

    pub async fn create(
        &self,
        actor: UserId,
        employee_id: EmployeeId,
        input: NewContract,
    ) -> ServiceResult<Contract> {
        require(&self.stores.employees, employee_id, "Employee not found").await?;
        let contract = Contract::create(employee_id, input)?;
        self.stores.contracts.put(&contract).await?;
        self.audit.record(actor, AuditAction::Create, ENTITY, contract.id).await?;
        Ok(contract)
    }

    pub async fn update_status(
        &self,
        actor: UserId,
        id: ContractId,
        status: ContractStatus,
    ) -> ServiceResult<Contract> {
        let mut contract = require(&self.stores.contracts, id, NOT_FOUND).await?;
        contract.set_status(status);
        self.stores.contracts.put(&contract).await?;
        self.audit.record(actor, AuditAction::UpdateStatus, ENTITY, id).await?;
        Ok(contract)
    }

    pub async fn extend(
        &self,
        actor: UserId,
        id: ContractId,
        new_end_date: NaiveDate,
    ) -> ServiceResult<Contract> {
        let mut contract = require(&self.stores.contracts, id, NOT_FOUND).await?;
        contract.extend(new_end_date)?;
        self.stores.contracts.put(&contract).await?;
        self.audit.record(actor, AuditAction::Extend, ENTITY, id).await?;
        tracing::info!(contract_id = %id, %new_end_date, "contract extended");
        Ok(contract)
    }

    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<Contract>> {
        Ok(Page::from_vec(self.stores.contracts.list().await?, page))
    }

    pub async fn search(
        &self,
        contract_type: Option<ContractType>,
        status: Option<ContractStatus>,
        page: PageRequest,
    ) -> ServiceResult<Page<Contract>> {
        let matches = self
            .filtered(|c| c.matches_filter(contract_type, status))
            .await?;
        Ok(Page::from_vec(matches, page))
    }

    pub async fn get(&self, id: ContractId) -> ServiceResult<Contract> {
        require(&self.stores.contracts, id, NOT_FOUND).await
    }

    pub async fn by_employee(&self, employee_id: EmployeeId) -> ServiceResult<Vec<Contract>> {
        self.filtered(|c| c.employee_id == employee_id).await
    }

    pub async fn by_type(&self, contract_type: ContractType) -> ServiceResult<Vec<Contract>> {
        self.filtered(|c| c.contract_type == contract_type).await
    }

    pub async fn by_status(&self, status: ContractStatus) -> ServiceResult<Vec<Contract>> {
        self.filtered(|c| c.status == status).await
    }

    pub async fn expired(&self, today: NaiveDate) -> ServiceResult<Vec<Contract>> {
        self.filtered(|c| c.is_expired(today)).await
    }

    pub async fn upcoming_expirations(&self, today: NaiveDate) -> ServiceResult<Vec<Contract>> {
        self.filtered(|c| c.expires_soon(today)).await
    }

    pub async fn active_count(&self) -> ServiceResult<u64> {
        Ok(self.filtered(Contract::is_active).await?.len() as u64)
    }

    pub async fn delete(&self, actor: UserId, id: ContractId) -> ServiceResult<()> {
        require(&self.stores.contracts, id, NOT_FOUND).await?;
        self.stores.contracts.remove(id.into()).await?;
        self.audit.record(actor, AuditAction::Delete, ENTITY, id).await?;
        Ok(())
    }

    async fn filtered(&self, keep: impl Fn(&Contract) -> bool) -> ServiceResult<Vec<Contract>> {
        Ok(self
            .stores
            .contracts
            .list()
            .await?
            .into_iter()
            .filter(|c| keep(c))
            .collect())
    }
}
