use core::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use workforce_core::{ContractId, DomainError, DomainResult, EmployeeId, Entity};

/// Window (in days) used by expiry dashboards.
pub const EXPIRY_WINDOW_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    FullTime,
    PartTime,
    Internship,
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractStatus {
    #[default]
    Active,
    Expired,
    Terminated,
}

impl ContractType {
    pub const ALL: [ContractType; 4] = [
        ContractType::FullTime,
        ContractType::PartTime,
        ContractType::Internship,
        ContractType::Temporary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractType::FullTime => "FullTime",
            ContractType::PartTime => "PartTime",
            ContractType::Internship => "Internship",
            ContractType::Temporary => "Temporary",
        }
    }
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 3] = [
        ContractStatus::Active,
        ContractStatus::Expired,
        ContractStatus::Terminated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Active => "Active",
            ContractStatus::Expired => "Expired",
            ContractStatus::Terminated => "Terminated",
        }
    }
}

impl FromStr for ContractType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::validation(
                    "contract type must be one of: FullTime, PartTime, Internship, Temporary",
                )
            })
    }
}

impl FromStr for ContractStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractStatus::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::validation("contract status must be one of: Active, Expired, Terminated")
            })
    }
}

/// Employment contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub employee_id: EmployeeId,
    pub contract_type: ContractType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: ContractStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContract {
    pub contract_type: ContractType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<ContractStatus>,
}

impl Contract {
    pub fn create(employee_id: EmployeeId, input: NewContract) -> DomainResult<Self> {
        if input.end_date.is_some_and(|end| end < input.start_date) {
            return Err(DomainError::invariant(
                "contract end date cannot be before start date",
            ));
        }
        Ok(Self {
            id: ContractId::new(),
            employee_id,
            contract_type: input.contract_type,
            start_date: input.start_date,
            end_date: input.end_date,
            status: input.status.unwrap_or_default(),
        })
    }

    pub fn set_status(&mut self, status: ContractStatus) {
        self.status = status;
    }

    /// Move the end date later. A contract without an end date can be given one
    /// as long as it does not precede the start date.
    pub fn extend(&mut self, new_end_date: NaiveDate) -> DomainResult<()> {
        if self.end_date.is_some_and(|current| new_end_date < current) {
            return Err(DomainError::validation(
                "New end date cannot be before current end date",
            ));
        }
        if new_end_date < self.start_date {
            return Err(DomainError::invariant(
                "contract end date cannot be before start date",
            ));
        }
        self.end_date = Some(new_end_date);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Active
    }

    /// End date strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < today)
    }

    /// End date strictly inside `(today, today + 30 days)`.
    pub fn expires_soon(&self, today: NaiveDate) -> bool {
        let horizon = window_end(today);
        self.end_date.is_some_and(|end| end > today && end < horizon)
    }

    /// End date inside `[today, today + 30 days]`.
    pub fn ends_within_window(&self, today: NaiveDate) -> bool {
        let horizon = window_end(today);
        self.end_date.is_some_and(|end| end >= today && end <= horizon)
    }

    /// Filters that are given must all match.
    pub fn matches_filter(&self, contract_type: Option<ContractType>, status: Option<ContractStatus>) -> bool {
        contract_type.is_none_or(|t| t == self.contract_type) && status.is_none_or(|s| s == self.status)
    }
}

impl Entity for Contract {
    type Id = ContractId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn window_end(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(EXPIRY_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contract(end: Option<NaiveDate>) -> Contract {
        Contract::create(
            EmployeeId::new(),
            NewContract {
                contract_type: ContractType::FullTime,
                start_date: date(2024, 1, 1),
                end_date: end,
                status: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn new_contract_defaults_to_active() {
        assert!(contract(None).is_active());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = Contract::create(
            EmployeeId::new(),
            NewContract {
                contract_type: ContractType::Temporary,
                start_date: date(2024, 6, 1),
                end_date: Some(date(2024, 5, 1)),
                status: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn extend_rejects_earlier_end_date() {
        let mut c = contract(Some(date(2024, 12, 31)));
        let err = c.extend(date(2024, 6, 30)).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("New end date cannot be before current end date")
        );
        c.extend(date(2025, 12, 31)).unwrap();
        assert_eq!(c.end_date, Some(date(2025, 12, 31)));
    }

    #[test]
    fn expiry_windows() {
        let today = date(2024, 6, 1);
        assert!(contract(Some(date(2024, 5, 31))).is_expired(today));
        assert!(!contract(Some(date(2024, 6, 1))).is_expired(today));

        assert!(contract(Some(date(2024, 6, 15))).expires_soon(today));
        assert!(!contract(Some(date(2024, 6, 1))).expires_soon(today));
        assert!(!contract(Some(date(2024, 7, 1))).expires_soon(today));

        assert!(contract(Some(date(2024, 6, 1))).ends_within_window(today));
        assert!(contract(Some(date(2024, 7, 1))).ends_within_window(today));
        assert!(!contract(None).ends_within_window(today));
    }

    #[test]
    fn filter_requires_all_given_criteria() {
        let c = contract(None);
        assert!(c.matches_filter(None, None));
        assert!(c.matches_filter(Some(ContractType::FullTime), Some(ContractStatus::Active)));
        assert!(!c.matches_filter(Some(ContractType::FullTime), Some(ContractStatus::Expired)));
        assert!(!c.matches_filter(Some(ContractType::PartTime), None));
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("fulltime".parse::<ContractType>().unwrap(), ContractType::FullTime);
        assert_eq!("EXPIRED".parse::<ContractStatus>().unwrap(), ContractStatus::Expired);
        assert!("seasonal".parse::<ContractType>().is_err());
    }
}
