use serde::{Deserialize, Serialize};

use workforce_core::text::{contains_ignore_case, opt_contains_ignore_case};
use workforce_core::{DepartmentId, DomainError, DomainResult, Entity};

/// Organizational unit employees and positions belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub location: Option<String>,
}

/// Input for creating a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Department {
    pub fn create(input: NewDepartment) -> DomainResult<Self> {
        DomainError::require_text("name", &input.name)?;
        Ok(Self {
            id: DepartmentId::new(),
            name: input.name.trim().to_string(),
            location: input.location,
        })
    }

    pub fn apply(&mut self, changes: DepartmentChanges) -> DomainResult<()> {
        if let Some(name) = changes.name {
            DomainError::require_text("name", &name)?;
            self.name = name.trim().to_string();
        }
        if let Some(location) = changes.location {
            self.location = Some(location);
        }
        Ok(())
    }

    /// Case-insensitive name comparison used for uniqueness.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Keyword match over name and location.
    pub fn matches(&self, term: &str) -> bool {
        contains_ignore_case(&self.name, term)
            || opt_contains_ignore_case(self.location.as_deref(), term)
    }
}

impl Entity for Department {
    type Id = DepartmentId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineering() -> Department {
        Department::create(NewDepartment {
            name: "  Engineering ".to_string(),
            location: Some("Berlin".to_string()),
        })
        .unwrap()
    }

    #[test]
    fn create_trims_name() {
        assert_eq!(engineering().name, "Engineering");
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = Department::create(NewDepartment {
            name: "   ".to_string(),
            location: None,
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut dept = engineering();
        dept.apply(DepartmentChanges {
            name: None,
            location: Some("Munich".to_string()),
        })
        .unwrap();
        assert_eq!(dept.name, "Engineering");
        assert_eq!(dept.location.as_deref(), Some("Munich"));
    }

    #[test]
    fn matches_name_or_location() {
        let dept = engineering();
        assert!(dept.matches("engine"));
        assert!(dept.matches("BERL"));
        assert!(!dept.matches("paris"));
        assert!(dept.has_name("engineering"));
    }
}
