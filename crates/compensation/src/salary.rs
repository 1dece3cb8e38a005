use serde::{Deserialize, Serialize};

use workforce_core::{DomainError, DomainResult, EmployeeId, Entity, Money, SalaryId};

/// One pay record for an employee. `total_salary` is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub id: SalaryId,
    pub employee_id: EmployeeId,
    pub base_salary: Money,
    pub bonus: Option<Money>,
    pub deductions: Option<Money>,
    pub total_salary: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSalary {
    pub base_salary: Money,
    #[serde(default)]
    pub bonus: Option<Money>,
    #[serde(default)]
    pub deductions: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryChanges {
    #[serde(default)]
    pub base_salary: Option<Money>,
    #[serde(default)]
    pub bonus: Option<Money>,
    #[serde(default)]
    pub deductions: Option<Money>,
}

/// Signed deltas applied by a bulk adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAdjustment {
    pub base: Money,
    #[serde(default)]
    pub bonus: Option<Money>,
}

/// `base + bonus - deductions`, missing components counting as zero.
pub fn total_salary(base: Money, bonus: Option<Money>, deductions: Option<Money>) -> DomainResult<Money> {
    base.checked_add(bonus.unwrap_or(Money::ZERO))?
        .checked_sub(deductions.unwrap_or(Money::ZERO))
}

impl Salary {
    pub fn create(employee_id: EmployeeId, input: NewSalary) -> DomainResult<Self> {
        let mut salary = Self {
            id: SalaryId::new(),
            employee_id,
            base_salary: input.base_salary,
            bonus: input.bonus,
            deductions: input.deductions,
            total_salary: Money::ZERO,
        };
        salary.recompute()?;
        Ok(salary)
    }

    pub fn apply(&mut self, changes: SalaryChanges) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(base) = changes.base_salary {
            next.base_salary = base;
        }
        if let Some(bonus) = changes.bonus {
            next.bonus = Some(bonus);
        }
        if let Some(deductions) = changes.deductions {
            next.deductions = Some(deductions);
        }
        next.recompute()?;
        *self = next;
        Ok(())
    }

    /// Add the adjustment deltas; a missing bonus starts from zero.
    pub fn adjust(&mut self, adjustment: SalaryAdjustment) -> DomainResult<()> {
        let mut next = self.clone();
        next.base_salary = next.base_salary.checked_add(adjustment.base)?;
        if let Some(delta) = adjustment.bonus {
            next.bonus = Some(next.bonus.unwrap_or(Money::ZERO).checked_add(delta)?);
        }
        next.recompute()?;
        *self = next;
        Ok(())
    }

    fn recompute(&mut self) -> DomainResult<()> {
        if self.base_salary.is_negative() {
            return Err(DomainError::validation("base salary cannot be negative"));
        }
        if self.bonus.is_some_and(Money::is_negative) {
            return Err(DomainError::validation("bonus cannot be negative"));
        }
        if self.deductions.is_some_and(Money::is_negative) {
            return Err(DomainError::validation("deductions cannot be negative"));
        }
        self.total_salary = total_salary(self.base_salary, self.bonus, self.deductions)?;
        Ok(())
    }
}

impl Entity for Salary {
    type Id = SalaryId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
