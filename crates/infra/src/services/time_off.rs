use workforce_audit::AuditAction;
use workforce_core::{EmployeeId, TimeOffRequestId, UserId};
use workforce_records::{NewTimeOffRequest, TimeOffRequest, TimeOffStatus};

use super::{require, AuditTrail, ServiceResult, Stores};

const ENTITY: &str = "TimeOffRequest";

#[derive(Clone)]
pub struct TimeOffService {
    stores: Stores,
    audit: AuditTrail,
}

impl TimeOffService {
    pub fn new(stores: Stores, audit: AuditTrail) -> Self {
        Self { stores, audit }
    }

    pub async fn submit(
        &self,
        actor: UserId,
        employee_id: EmployeeId,
        input: NewTimeOffRequest,
    ) -> ServiceResult<TimeOffRequest> {
        require(&self.stores.employees, employee_id, "Employee not found").await?;
        let request = TimeOffRequest::submit(employee_id, input)?;
        self.stores.time_off.put(&request).await?;
        self.audit.record(actor, AuditAction::Create, ENTITY, request.id).await?;
        tracing::info!(request_id = %request.id, %employee_id, days = request.days(), "time off requested");
        Ok(request)
    }

    pub async fn update_status(
        &self,
        actor: UserId,
        id: TimeOffRequestId,
        status: TimeOffStatus,
    ) -> ServiceResult<TimeOffRequest> {
        let mut request = require(&self.stores.time_off, id, "Request not found").await?;
        request.set_status(status);
        self.stores.time_off.put(&request).await?;
        self.audit.record(actor, AuditAction::UpdateStatus, ENTITY, id).await?;
        Ok(request)
    }

    pub async fn by_employee(&self, employee_id: EmployeeId) -> ServiceResult<Vec<TimeOffRequest>> {
        Ok(self
            .stores
            .time_off
            .list()
            .await?
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect())
    }

    pub async fn list(&self) -> ServiceResult<Vec<TimeOffRequest>> {
        Ok(self.stores.time_off.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::services::testing::*;
    use crate::services::ServiceError;
    use workforce_records::DEFAULT_LEAVE_BALANCE;

    fn service(stores: &Stores) -> TimeOffService {
        TimeOffService::new(stores.clone(), AuditTrail::new(stores.audit.clone()))
    }

    fn range(start: u32, end: u32) -> NewTimeOffRequest {
        NewTimeOffRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 8, start).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, end).unwrap(),
        }
    }

    #[tokio::test]
    async fn submit_then_approve() {
        let stores = Stores::in_memory();
        let svc = service(&stores);
        let dept = seed_department(&stores, "Ops").await;
        let pos = seed_position(&stores, dept.id, "Tech").await;
        let emp = seed_employee(&stores, dept.id, pos.id, "leave@example.com").await;

        let req = svc.submit(actor(), emp.id, range(5, 9)).await.unwrap();
        assert_eq!(req.status, TimeOffStatus::Pending);
        assert_eq!(req.leave_balance, DEFAULT_LEAVE_BALANCE);

        let approved = svc
            .update_status(actor(), req.id, TimeOffStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.status, TimeOffStatus::Approved);
        assert_eq!(svc.by_employee(emp.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn submit_rejects_reversed_range() {
        let stores = Stores::in_memory();
        let dept = seed_department(&stores, "Ops").await;
        let pos = seed_position(&stores, dept.id, "Tech").await;
        let emp = seed_employee(&stores, dept.id, pos.id, "leave@example.com").await;

        let err = service(&stores).submit(actor(), emp.id, range(9, 5)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invariant(_)));
    }

    #[tokio::test]
    async fn unknown_request() {
        let stores = Stores::in_memory();
        let err = service(&stores)
            .update_status(actor(), TimeOffRequestId::new(), TimeOffStatus::Rejected)
            .await
            .unwrap_err();
        match err {
            ServiceError::NotFound(msg) => assert_eq!(msg, "Request not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
