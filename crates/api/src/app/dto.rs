use core::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use workforce_compensation::NewSalary;
use workforce_contracts::NewContract;
use workforce_core::{DepartmentId, DomainError, EmployeeId, Money, PageRequest, PositionId};
use workforce_employees::NewEmployee;
use workforce_organization::NewPosition;
use workforce_records::{NewDocument, NewTimeOffRequest};

use crate::app::errors::ApiError;

// -------------------------
// Query parameters
// -------------------------

/// `?page=&size=`; 0-based page, size clamped to 1..=100.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KeywordParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PositionSearchParams {
    pub title: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractSearchParams {
    #[serde(rename = "type")]
    pub contract_type: Option<String>,
    pub status: Option<String>,
}

/// Inclusive base-salary bounds in cents.
#[derive(Debug, Default, Deserialize)]
pub struct SalaryRangeParams {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AllParams {
    #[serde(default)]
    pub all: bool,
}

// -------------------------
// Request bodies
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePositionRequest {
    pub department_id: DepartmentId,
    #[serde(flatten)]
    pub position: NewPosition,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    #[serde(flatten)]
    pub employee: NewEmployee,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateEmployeesRequest {
    pub department_id: DepartmentId,
    pub position_id: PositionId,
    pub employees: Vec<NewEmployee>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub department_id: DepartmentId,
    pub position_id: PositionId,
}

#[derive(Debug, Deserialize)]
pub struct CreateSalaryRequest {
    pub employee_id: EmployeeId,
    #[serde(flatten)]
    pub salary: NewSalary,
}

#[derive(Debug, Deserialize)]
pub struct BulkAdjustRequest {
    pub employee_ids: Vec<EmployeeId>,
    pub base_adjustment: Money,
    #[serde(default)]
    pub bonus_adjustment: Option<Money>,
}

#[derive(Debug, Deserialize)]
pub struct CreateContractRequest {
    pub employee_id: EmployeeId,
    #[serde(flatten)]
    pub contract: NewContract,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtendContractRequest {
    pub new_end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UploadDocumentRequest {
    pub employee_id: EmployeeId,
    #[serde(flatten)]
    pub document: NewDocument,
}

#[derive(Debug, Deserialize)]
pub struct SubmitTimeOffRequest {
    pub employee_id: EmployeeId,
    #[serde(flatten)]
    pub request: NewTimeOffRequest,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub two_factor_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct TwoFactorCodeRequest {
    pub code: String,
}

// -------------------------
// Parsing helpers
// -------------------------

/// Parse a path or query value, turning the domain error into a 400.
pub fn parse<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(ApiError::from)
}

/// Parse an optional filter; blank values count as absent.
pub fn parse_opt<T>(raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse)
        .transpose()
}

pub fn parse_money(raw: &str) -> Result<Money, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map(Money::from_cents)
        .map_err(|_| ApiError::bad_request(format!("invalid amount: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_contracts::ContractType;

    #[test]
    fn blank_filters_are_absent() {
        assert_eq!(parse_opt::<ContractType>(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_opt::<ContractType>(Some("fulltime")).unwrap(),
            Some(ContractType::FullTime)
        );
        assert!(parse_opt::<ContractType>(Some("gig")).is_err());
    }

    #[test]
    fn ids_and_amounts() {
        let id = EmployeeId::new();
        assert_eq!(parse::<EmployeeId>(&id.to_string()).unwrap(), id);
        assert_eq!(parse::<EmployeeId>("nope").unwrap_err().status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(parse_money("1500").unwrap(), Money::from_cents(1500));
        assert!(parse_money("1.5").is_err());
    }

    #[test]
    fn flattened_bodies() {
        let dept = DepartmentId::new();
        let body = serde_json::json!({
            "department_id": dept,
            "title": "Engineer",
            "level": "Senior"
        });
        let req: CreatePositionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.department_id, dept);
        assert_eq!(req.position.title, "Engineer");
    }
}
