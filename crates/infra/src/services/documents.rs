use chrono::NaiveDate;
use workforce_audit::AuditAction;
use workforce_core::{EmployeeId, UserId};
use workforce_records::{Document, NewDocument};

use super::{require, AuditTrail, ServiceResult, Stores};

#[derive(Clone)]
pub struct DocumentService {
    stores: Stores,
    audit: AuditTrail,
}

impl DocumentService {
    pub fn new(stores: Stores, audit: AuditTrail) -> Self {
        Self { stores, audit }
    }

    pub async fn upload(
        &self,
        actor: UserId,
        employee_id: EmployeeId,
        input: NewDocument,
        today: NaiveDate,
    ) -> ServiceResult<Document> {
        require(&self.stores.employees, employee_id, "Employee not found").await?;
        let document = Document::create(employee_id, input, today)?;
        self.stores.documents.put(&document).await?;
        self.audit.record(actor, AuditAction::Create, "Document", document.id).await?;
        Ok(document)
    }

    pub async fn by_employee(&self, employee_id: EmployeeId) -> ServiceResult<Vec<Document>> {
        Ok(self
            .stores
            .documents
            .list()
            .await?
            .into_iter()
            .filter(|d| d.employee_id == employee_id)
            .collect())
    }

    pub async fn list(&self) -> ServiceResult<Vec<Document>> {
        Ok(self.stores.documents.list().await?)
    }
}
