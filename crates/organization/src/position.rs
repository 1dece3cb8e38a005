use core::str::FromStr;

use serde::{Deserialize, Serialize};

use workforce_core::text::{contains_ignore_case, opt_contains_ignore_case};
use workforce_core::{DepartmentId, DomainError, DomainResult, Entity, PositionId};

/// Seniority band of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionLevel {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl PositionLevel {
    pub const ALL: [PositionLevel; 4] = [
        PositionLevel::Junior,
        PositionLevel::Mid,
        PositionLevel::Senior,
        PositionLevel::Lead,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PositionLevel::Junior => "Junior",
            PositionLevel::Mid => "Mid",
            PositionLevel::Senior => "Senior",
            PositionLevel::Lead => "Lead",
        }
    }
}

impl core::fmt::Display for PositionLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PositionLevel::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::validation("level must be one of: Junior, Mid, Senior, Lead")
            })
    }
}

/// Job position offered within one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<PositionLevel>,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPosition {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<PositionLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<PositionLevel>,
}

impl Position {
    pub fn create(department_id: DepartmentId, input: NewPosition) -> DomainResult<Self> {
        DomainError::require_text("title", &input.title)?;
        Ok(Self {
            id: PositionId::new(),
            title: input.title.trim().to_string(),
            description: input.description,
            level: input.level,
            department_id,
        })
    }

    pub fn apply(&mut self, changes: PositionChanges) -> DomainResult<()> {
        if let Some(title) = changes.title {
            DomainError::require_text("title", &title)?;
            self.title = title.trim().to_string();
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(level) = changes.level {
            self.level = Some(level);
        }
        Ok(())
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.title.eq_ignore_ascii_case(title.trim())
    }

    /// Search filter: title contains `term` OR level equals `level`.
    ///
    /// With neither criterion given every position matches.
    pub fn matches_filter(&self, term: Option<&str>, level: Option<PositionLevel>) -> bool {
        let term = term.map(str::trim).filter(|t| !t.is_empty());
        match (term, level) {
            (None, None) => true,
            (term, level) => {
                term.is_some_and(|t| contains_ignore_case(&self.title, t))
                    || (level.is_some() && self.level == level)
            }
        }
    }

    /// Keyword match over title, description and level.
    pub fn matches(&self, term: &str) -> bool {
        contains_ignore_case(&self.title, term)
            || opt_contains_ignore_case(self.description.as_deref(), term)
            || self
                .level
                .is_some_and(|l| contains_ignore_case(l.as_str(), term))
    }
}

impl Entity for Position {
    type Id = PositionId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_engineer() -> Position {
        Position::create(
            DepartmentId::new(),
            NewPosition {
                title: "Backend Engineer".to_string(),
                description: Some("Builds services".to_string()),
                level: Some(PositionLevel::Senior),
            },
        )
        .unwrap()
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("lead".parse::<PositionLevel>().unwrap(), PositionLevel::Lead);
        assert!("principal".parse::<PositionLevel>().is_err());
    }

    #[test]
    fn filter_is_title_or_level() {
        let pos = backend_engineer();
        assert!(pos.matches_filter(Some("backend"), None));
        assert!(pos.matches_filter(Some("nothing"), Some(PositionLevel::Senior)));
        assert!(!pos.matches_filter(Some("nothing"), Some(PositionLevel::Junior)));
        assert!(pos.matches_filter(None, None));
    }

    #[test]
    fn keyword_match_covers_description_and_level() {
        let pos = backend_engineer();
        assert!(pos.matches("services"));
        assert!(pos.matches("senior"));
        assert!(!pos.matches("frontend"));
    }

    #[test]
    fn apply_rejects_blank_title() {
        let mut pos = backend_engineer();
        let err = pos
            .apply(PositionChanges {
                title: Some(" ".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(pos.title, "Backend Engineer");
    }
}
