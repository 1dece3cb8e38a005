use workforce_audit::AuditAction;
use workforce_core::{DepartmentId, Page, PageRequest, UserId};
use workforce_organization::{Department, DepartmentChanges, NewDepartment};

use super::{require, AuditTrail, ServiceError, ServiceResult, Stores};

const ENTITY: &str = "Department";
const NOT_FOUND: &str = "Department not found";

#[derive(Clone)]
pub struct DepartmentService {
    stores: Stores,
    audit: AuditTrail,
}

impl DepartmentService {
    pub fn new(stores: Stores, audit: AuditTrail) -> Self {
        Self { stores, audit }
    }

    pub async fn create(&self, actor: UserId, input: NewDepartment) -> ServiceResult<Department> {
        let dept = Department::create(input)?;
        if self.find_by_name(&dept.name).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "Department with name: {} already exists",
                dept.name
            )));
        }

        self.stores.departments.put(&dept).await?;
        self.audit.record(actor, AuditAction::Create, ENTITY, dept.id).await?;
        tracing::info!(department_id = %dept.id, name = %dept.name, "department created");
        Ok(dept)
    }

    pub async fn update(
        &self,
        actor: UserId,
        id: DepartmentId,
        changes: DepartmentChanges,
    ) -> ServiceResult<Department> {
        let mut dept = require(&self.stores.departments, id, NOT_FOUND).await?;

        if let Some(name) = changes.name.as_deref() {
            if !dept.has_name(name) {
                if let Some(other) = self.find_by_name(name).await? {
                    if other.id != id {
                        return Err(ServiceError::conflict(format!(
                            "Department with name: {} already exists",
                            name.trim()
                        )));
                    }
                }
            }
        }

        dept.apply(changes)?;
        self.stores.departments.put(&dept).await?;
        self.audit.record(actor, AuditAction::Update, ENTITY, id).await?;
        Ok(dept)
    }

    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<Department>> {
        Ok(Page::from_vec(self.stores.departments.list().await?, page))
    }

    pub async fn all(&self) -> ServiceResult<Vec<Department>> {
        Ok(self.stores.departments.list().await?)
    }

    /// Case-insensitive match on name or location.
    pub async fn search(&self, term: &str, page: PageRequest) -> ServiceResult<Page<Department>> {
        let term = term.trim();
        let matches = self
            .stores
            .departments
            .list()
            .await?
            .into_iter()
            .filter(|d| d.matches(term))
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    pub async fn get(&self, id: DepartmentId) -> ServiceResult<Department> {
        require(&self.stores.departments, id, NOT_FOUND).await
    }

    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Department> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
    }

    /// Departments still referenced by employees or positions cannot be removed.
    pub async fn delete(&self, actor: UserId, id: DepartmentId) -> ServiceResult<()> {
        require(&self.stores.departments, id, NOT_FOUND).await?;

        let staffed = self
            .stores
            .employees
            .list()
            .await?
            .iter()
            .any(|e| e.department_id == id);
        let has_positions = self
            .stores
            .positions
            .list()
            .await?
            .iter()
            .any(|p| p.department_id == id);
        if staffed || has_positions {
            return Err(ServiceError::conflict(
                "Department still has employees or positions",
            ));
        }

        self.stores.departments.remove(id.into()).await?;
        self.audit.record(actor, AuditAction::Delete, ENTITY, id).await?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Department>> {
        Ok(self
            .stores
            .departments
            .list()
            .await?
            .into_iter()
            .find(|d| d.has_name(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::*;

    fn service(stores: &Stores) -> DepartmentService {
        DepartmentService::new(stores.clone(), AuditTrail::new(stores.audit.clone()))
    }

    fn input(name: &str, location: Option<&str>) -> NewDepartment {
        NewDepartment {
            name: name.to_string(),
            location: location.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        svc.create(actor(), input("Engineering", None)).await.unwrap();

        let err = svc.create(actor(), input("engineering", None)).await.unwrap_err();
        match err {
            ServiceError::Conflict(msg) => {
                assert_eq!(msg, "Department with name: engineering already exists")
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_writes_audit_entry() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        let who = actor();
        let dept = svc.create(who, input("Finance", Some("Paris"))).await.unwrap();

        let entries = stores.audit.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Create);
        assert_eq!(entries[0].entity_name, "Department");
        assert_eq!(entries[0].entity_id, *dept.id.as_uuid());
        assert_eq!(entries[0].performed_by, who);
    }

    #[tokio::test]
    async fn rename_to_taken_name_conflicts() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        svc.create(actor(), input("Sales", None)).await.unwrap();
        let ops = svc.create(actor(), input("Ops", None)).await.unwrap();

        let err = svc
            .update(
                actor(),
                ops.id,
                DepartmentChanges {
                    name: Some("Sales".to_string()),
                    location: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let renamed = svc
            .update(
                actor(),
                ops.id,
                DepartmentChanges {
                    name: Some("OPS".to_string()),
                    location: Some("Lyon".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "OPS");
        assert_eq!(renamed.location.as_deref(), Some("Lyon"));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let stores = Stores::in_memory();
        let err = service(&stores)
            .update(actor(), DepartmentId::new(), DepartmentChanges::default())
            .await
            .unwrap_err();
        match err {
            ServiceError::NotFound(msg) => assert_eq!(msg, "Department not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_and_pagination() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        for (name, loc) in [("Engineering", "Berlin"), ("Sales", "Berlin"), ("Legal", "Rome")] {
            svc.create(actor(), input(name, Some(loc))).await.unwrap();
        }

        let found = svc.search("berlin", PageRequest::default()).await.unwrap();
        assert_eq!(found.total_items, 2);

        let page = svc.list(PageRequest::new(Some(1), Some(2))).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Legal");
        assert_eq!(page.total_pages, 2);

        assert_eq!(svc.get_by_name("SALES").await.unwrap().name, "Sales");
    }

    #[tokio::test]
    async fn delete_refuses_staffed_department() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        let dept = svc.create(actor(), input("Support", None)).await.unwrap();
        seed_position(&stores, dept.id, "Agent").await;

        let err = svc.delete(actor(), dept.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let empty = svc.create(actor(), input("Empty", None)).await.unwrap();
        svc.delete(actor(), empty.id).await.unwrap();
        assert!(matches!(svc.get(empty.id).await, Err(ServiceError::NotFound(_))));
    }
}
