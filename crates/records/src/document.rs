use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use workforce_core::{DocumentId, DomainError, DomainResult, EmployeeId, Entity};

/// Metadata of a file attached to an employee. The file content itself is
/// kept outside this system; only its path is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub employee_id: EmployeeId,
    pub file_name: String,
    pub file_path: String,
    pub upload_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub upload_date: Option<NaiveDate>,
}

impl Document {
    pub fn create(employee_id: EmployeeId, input: NewDocument, today: NaiveDate) -> DomainResult<Self> {
        DomainError::require_text("file name", &input.file_name)?;
        DomainError::require_text("file path", &input.file_path)?;
        Ok(Self {
            id: DocumentId::new(),
            employee_id,
            file_name: input.file_name.trim().to_string(),
            file_path: input.file_path.trim().to_string(),
            upload_date: input.upload_date.unwrap_or(today),
        })
    }
}

impl Entity for Document {
    type Id = DocumentId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
