use workforce_audit::{newest_first, AuditEntry};
use workforce_core::UserId;

use super::{ServiceResult, Stores};

/// Read side of the audit trail. Entries are written by [`super::AuditTrail`].
#[derive(Clone)]
pub struct AuditService {
    stores: Stores,
}

impl AuditService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn all(&self) -> ServiceResult<Vec<AuditEntry>> {
        let mut entries = self.stores.audit.list().await?;
        newest_first(&mut entries);
        Ok(entries)
    }

    pub async fn by_user(&self, user_id: UserId) -> ServiceResult<Vec<AuditEntry>> {
        let mut entries = self.all().await?;
        entries.retain(|e| e.performed_by == user_id);
        Ok(entries)
    }

    pub async fn recent(&self, limit: usize) -> ServiceResult<Vec<AuditEntry>> {
        let mut entries = self.all().await?;
        entries.truncate(limit);
        Ok(entries)
    }
}
