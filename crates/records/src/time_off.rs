use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use workforce_core::{DomainError, DomainResult, EmployeeId, Entity, TimeOffRequestId};

/// Leave balance (days) recorded on every new request.
pub const DEFAULT_LEAVE_BALANCE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeOffStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl TimeOffStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeOffStatus::Pending => "Pending",
            TimeOffStatus::Approved => "Approved",
            TimeOffStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for TimeOffStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [TimeOffStatus::Pending, TimeOffStatus::Approved, TimeOffStatus::Rejected]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation("status must be one of: Pending, Approved, Rejected"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub id: TimeOffRequestId,
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TimeOffStatus,
    pub leave_balance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeOffRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TimeOffRequest {
    /// New requests always start out pending, whatever the caller sent.
    pub fn submit(employee_id: EmployeeId, input: NewTimeOffRequest) -> DomainResult<Self> {
        if input.end_date < input.start_date {
            return Err(DomainError::invariant(
                "time-off end date cannot be before start date",
            ));
        }
        Ok(Self {
            id: TimeOffRequestId::new(),
            employee_id,
            start_date: input.start_date,
            end_date: input.end_date,
            status: TimeOffStatus::Pending,
            leave_balance: DEFAULT_LEAVE_BALANCE,
        })
    }

    pub fn set_status(&mut self, status: TimeOffStatus) {
        self.status = status;
    }

    /// Calendar days covered, both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Entity for TimeOffRequest {
    type Id = TimeOffRequestId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
