use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use workforce_core::text::{contains_ignore_case, normalize_email};
use workforce_core::{DepartmentId, DomainError, DomainResult, EmployeeId, Entity, PositionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A person employed by the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub termination_date: Option<NaiveDate>,
    pub probation_end_date: Option<NaiveDate>,
    pub department_id: DepartmentId,
    pub position_id: PositionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub probation_end_date: Option<NaiveDate>,
}

/// Partial update; `None` keeps the current value. Email and placement are not
/// editable here (placement changes go through a transfer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeChanges {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    #[serde(default)]
    pub probation_end_date: Option<NaiveDate>,
}

impl Employee {
    pub fn create(
        department_id: DepartmentId,
        position_id: PositionId,
        input: NewEmployee,
    ) -> DomainResult<Self> {
        DomainError::require_text("first name", &input.first_name)?;
        DomainError::require_text("last name", &input.last_name)?;
        let email = validate_email(&input.email)?;

        let employee = Self {
            id: EmployeeId::new(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            gender: input.gender,
            email,
            phone: input.phone,
            date_of_birth: input.date_of_birth,
            hire_date: input.hire_date,
            termination_date: None,
            probation_end_date: input.probation_end_date,
            department_id,
            position_id,
        };
        employee.check_dates()?;
        Ok(employee)
    }

    /// Apply a partial update. The record is left untouched when the merged
    /// result would be invalid.
    pub fn apply(&mut self, changes: EmployeeChanges) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(first_name) = changes.first_name {
            DomainError::require_text("first name", &first_name)?;
            next.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = changes.last_name {
            DomainError::require_text("last name", &last_name)?;
            next.last_name = last_name.trim().to_string();
        }
        if let Some(gender) = changes.gender {
            next.gender = Some(gender);
        }
        if let Some(phone) = changes.phone {
            next.phone = Some(phone);
        }
        if let Some(dob) = changes.date_of_birth {
            next.date_of_birth = Some(dob);
        }
        if let Some(hire_date) = changes.hire_date {
            next.hire_date = Some(hire_date);
        }
        if let Some(termination_date) = changes.termination_date {
            next.termination_date = Some(termination_date);
        }
        if let Some(probation_end_date) = changes.probation_end_date {
            next.probation_end_date = Some(probation_end_date);
        }
        next.check_dates()?;
        *self = next;
        Ok(())
    }

    pub fn transfer(&mut self, department_id: DepartmentId, position_id: PositionId) {
        self.department_id = department_id;
        self.position_id = position_id;
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_terminated(&self) -> bool {
        self.termination_date.is_some()
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email == normalize_email(email)
    }

    /// Keyword match over the employee's own fields (name, email).
    pub fn matches(&self, term: &str) -> bool {
        contains_ignore_case(&self.first_name, term)
            || contains_ignore_case(&self.last_name, term)
            || contains_ignore_case(&self.email, term)
    }

    fn check_dates(&self) -> DomainResult<()> {
        if let (Some(dob), Some(hire)) = (self.date_of_birth, self.hire_date) {
            if dob >= hire {
                return Err(DomainError::invariant(
                    "date of birth must be before hire date",
                ));
            }
        }
        if let Some(hire) = self.hire_date {
            if self.termination_date.is_some_and(|t| t < hire) {
                return Err(DomainError::invariant(
                    "termination date cannot be before hire date",
                ));
            }
            if self.probation_end_date.is_some_and(|p| p < hire) {
                return Err(DomainError::invariant(
                    "probation end date cannot be before hire date",
                ));
            }
        }
        Ok(())
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validate and normalize an email address.
pub fn validate_email(email: &str) -> DomainResult<String> {
    let email = normalize_email(email);
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(DomainError::validation(format!("invalid email: {email}")));
    }
    Ok(email)
}

/// Percentage of employees with a termination date, truncated to a whole number.
pub fn turnover_rate<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> u32 {
    let (total, terminated) = employees.into_iter().fold((0u64, 0u64), |(t, x), e| {
        (t + 1, x + u64::from(e.is_terminated()))
    });
    if total == 0 {
        return 0;
    }
    (terminated * 100 / total) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_employee() -> NewEmployee {
        NewEmployee {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            gender: Some(Gender::Female),
            email: " Ada@Example.com ".to_string(),
            phone: None,
            date_of_birth: Some(date(1990, 12, 10)),
            hire_date: Some(date(2020, 1, 6)),
            probation_end_date: Some(date(2020, 7, 6)),
        }
    }

    fn ada() -> Employee {
        Employee::create(DepartmentId::new(), PositionId::new(), new_employee()).unwrap()
    }

    #[test]
    fn create_normalizes_email() {
        let emp = ada();
        assert_eq!(emp.email, "ada@example.com");
        assert!(emp.has_email("ADA@example.com"));
        assert!(!emp.is_terminated());
    }

    #[test]
    fn create_rejects_bad_email() {
        let mut input = new_employee();
        input.email = "not-an-email".to_string();
        let err = Employee::create(DepartmentId::new(), PositionId::new(), input).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_birth_after_hire() {
        let mut input = new_employee();
        input.date_of_birth = Some(date(2021, 1, 1));
        let err = Employee::create(DepartmentId::new(), PositionId::new(), input).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn termination_before_hire_is_rejected_and_record_kept() {
        let mut emp = ada();
        let err = emp
            .apply(EmployeeChanges {
                first_name: Some("Augusta".to_string()),
                termination_date: Some(date(2019, 1, 1)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(emp.first_name, "Ada");
        assert!(emp.termination_date.is_none());
    }

    #[test]
    fn apply_updates_given_fields() {
        let mut emp = ada();
        emp.apply(EmployeeChanges {
            phone: Some("+44 20 7946 0000".to_string()),
            termination_date: Some(date(2024, 3, 31)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(emp.phone.as_deref(), Some("+44 20 7946 0000"));
        assert!(emp.is_terminated());
        assert_eq!(emp.last_name, "Lovelace");
    }

    #[test]
    fn turnover_rate_truncates() {
        let mut a = ada();
        let b = ada();
        let c = ada();
        a.termination_date = Some(date(2024, 1, 1));
        assert_eq!(turnover_rate([&a, &b, &c]), 33);
        assert_eq!(turnover_rate(Vec::<&Employee>::new()), 0);
    }
}
