use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workforce_core::{AuditEntryId, Entity, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Transfer,
    UpdateStatus,
    Extend,
    BulkAdjust,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Transfer => "TRANSFER",
            AuditAction::UpdateStatus => "UPDATE_STATUS",
            AuditAction::Extend => "EXTEND",
            AuditAction::BulkAdjust => "BULK_ADJUST",
        }
    }
}

impl core::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only record of a mutation: who did what to which record, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub action: AuditAction,
    pub entity_name: String,
    pub entity_id: Uuid,
    pub performed_by: UserId,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        entity_name: impl Into<String>,
        entity_id: impl Into<Uuid>,
        performed_by: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            action,
            entity_name: entity_name.into(),
            entity_id: entity_id.into(),
            performed_by,
            timestamp,
        }
    }
}

impl Entity for AuditEntry {
    type Id = AuditEntryId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Newest first; ties broken by id so entries written in the same instant keep
/// their write order.
pub fn newest_first(entries: &mut [AuditEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}
