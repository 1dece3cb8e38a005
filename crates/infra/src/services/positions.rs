use workforce_audit::AuditAction;
use workforce_core::{DepartmentId, Page, PageRequest, PositionId, UserId};
use workforce_organization::{NewPosition, Position, PositionChanges, PositionLevel};

use super::{require, AuditTrail, ServiceError, ServiceResult, Stores};

const ENTITY: &str = "Position";
const NOT_FOUND: &str = "Position not found";

#[derive(Clone)]
pub struct PositionService {
    stores: Stores,
    audit: AuditTrail,
}

impl PositionService {
    pub fn new(stores: Stores, audit: AuditTrail) -> Self {
        Self { stores, audit }
    }

    pub async fn create(
        &self,
        actor: UserId,
        department_id: DepartmentId,
        input: NewPosition,
    ) -> ServiceResult<Position> {
        require(&self.stores.departments, department_id, "Department not found").await?;
        let position = Position::create(department_id, input)?;
        self.ensure_unique_title(department_id, &position.title, None).await?;

        self.stores.positions.put(&position).await?;
        self.audit.record(actor, AuditAction::Create, ENTITY, position.id).await?;
        Ok(position)
    }

    pub async fn update(
        &self,
        actor: UserId,
        id: PositionId,
        changes: PositionChanges,
    ) -> ServiceResult<Position> {
        let mut position = require(&self.stores.positions, id, NOT_FOUND).await?;
        if let Some(title) = changes.title.as_deref() {
            self.ensure_unique_title(position.department_id, title, Some(id)).await?;
        }

        position.apply(changes)?;
        self.stores.positions.put(&position).await?;
        self.audit.record(actor, AuditAction::Update, ENTITY, id).await?;
        Ok(position)
    }

    pub async fn list(&self, page: PageRequest) -> ServiceResult<Page<Position>> {
        Ok(Page::from_vec(self.stores.positions.list().await?, page))
    }

    /// Title contains `term` OR level equals `level`.
    pub async fn search(
        &self,
        term: Option<&str>,
        level: Option<PositionLevel>,
        page: PageRequest,
    ) -> ServiceResult<Page<Position>> {
        let matches = self
            .stores
            .positions
            .list()
            .await?
            .into_iter()
            .filter(|p| p.matches_filter(term, level))
            .collect();
        Ok(Page::from_vec(matches, page))
    }

    pub async fn get(&self, id: PositionId) -> ServiceResult<Position> {
        require(&self.stores.positions, id, NOT_FOUND).await
    }

    pub async fn by_department(&self, department_id: DepartmentId) -> ServiceResult<Vec<Position>> {
        Ok(self
            .stores
            .positions
            .list()
            .await?
            .into_iter()
            .filter(|p| p.department_id == department_id)
            .collect())
    }

    pub async fn by_level(&self, level: PositionLevel) -> ServiceResult<Vec<Position>> {
        Ok(self
            .stores
            .positions
            .list()
            .await?
            .into_iter()
            .filter(|p| p.level == Some(level))
            .collect())
    }

    pub fn levels(&self) -> Vec<PositionLevel> {
        PositionLevel::ALL.to_vec()
    }

    pub async fn delete(&self, actor: UserId, id: PositionId) -> ServiceResult<()> {
        require(&self.stores.positions, id, NOT_FOUND).await?;
        let held = self
            .stores
            .employees
            .list()
            .await?
            .iter()
            .any(|e| e.position_id == id);
        if held {
            return Err(ServiceError::conflict("Position is still held by employees"));
        }

        self.stores.positions.remove(id.into()).await?;
        self.audit.record(actor, AuditAction::Delete, ENTITY, id).await?;
        Ok(())
    }

    async fn ensure_unique_title(
        &self,
        department_id: DepartmentId,
        title: &str,
        except: Option<PositionId>,
    ) -> ServiceResult<()> {
        let taken = self
            .stores
            .positions
            .list()
            .await?
            .iter()
            .any(|p| p.department_id == department_id && p.has_title(title) && Some(p.id) != except);
        if taken {
            return Err(ServiceError::conflict(format!(
                "Position with title: {} already exists in the department",
                title.trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::*;

    fn service(stores: &Stores) -> PositionService {
        PositionService::new(stores.clone(), AuditTrail::new(stores.audit.clone()))
    }

    fn input(title: &str, level: Option<PositionLevel>) -> NewPosition {
        NewPosition {
            title: title.to_string(),
            description: None,
            level,
        }
    }

    #[tokio::test]
    async fn create_requires_department() {
        let stores = Stores::in_memory();
        let err = service(&stores)
            .create(actor(), DepartmentId::new(), input("Analyst", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn title_is_unique_per_department_only() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        let eng = seed_department(&stores, "Engineering").await;
        let ops = seed_department(&stores, "Ops").await;

        svc.create(actor(), eng.id, input("Lead", None)).await.unwrap();
        svc.create(actor(), ops.id, input("Lead", None)).await.unwrap();

        let err = svc.create(actor(), eng.id, input("lead", None)).await.unwrap_err();
        match err {
            ServiceError::Conflict(msg) => {
                assert_eq!(msg, "Position with title: lead already exists in the department")
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn keeping_own_title_on_update_is_fine() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        let eng = seed_department(&stores, "Engineering").await;
        let pos = svc.create(actor(), eng.id, input("Tester", None)).await.unwrap();

        let updated = svc
            .update(
                actor(),
                pos.id,
                PositionChanges {
                    title: Some("Tester".to_string()),
                    level: Some(PositionLevel::Mid),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.level, Some(PositionLevel::Mid));
    }

    #[tokio::test]
    async fn search_uses_or_semantics() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        let eng = seed_department(&stores, "Engineering").await;
        svc.create(actor(), eng.id, input("Backend Engineer", Some(PositionLevel::Junior)))
            .await
            .unwrap();
        svc.create(actor(), eng.id, input("Designer", Some(PositionLevel::Senior)))
            .await
            .unwrap();
        svc.create(actor(), eng.id, input("Manager", Some(PositionLevel::Lead)))
            .await
            .unwrap();

        let found = svc
            .search(Some("engineer"), Some(PositionLevel::Senior), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(found.total_items, 2);

        assert_eq!(svc.by_level(PositionLevel::Lead).await.unwrap().len(), 1);
        assert_eq!(svc.by_department(eng.id).await.unwrap().len(), 3);
        assert_eq!(svc.levels().len(), 4);
    }

    #[tokio::test]
    async fn delete_refuses_held_position() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        let eng = seed_department(&stores, "Engineering").await;
        let pos = svc.create(actor(), eng.id, input("SRE", None)).await.unwrap();
        seed_employee(&stores, eng.id, pos.id, "sre@example.com").await;

        assert!(matches!(
            svc.delete(actor(), pos.id).await,
            Err(ServiceError::Conflict(_))
        ));
    }
}
