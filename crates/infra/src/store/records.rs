//! Collection names for every persisted record type.

use uuid::Uuid;

use workforce_audit::AuditEntry;
use workforce_auth::UserAccount;
use workforce_compensation::Salary;
use workforce_contracts::Contract;
use workforce_employees::Employee;
use workforce_organization::{Department, Position};
use workforce_records::{Document, TimeOffRequest};

use super::Record;

macro_rules! record {
    ($t:ty, $collection:literal) => {
        impl Record for $t {
            const COLLECTION: &'static str = $collection;

            fn key(&self) -> Uuid {
                self.id.into()
            }
        }
    };
}

record!(Department, "departments");
record!(Position, "positions");
record!(Employee, "employees");
record!(Salary, "salaries");
record!(Contract, "contracts");
record!(Document, "documents");
record!(TimeOffRequest, "time_off_requests");
record!(AuditEntry, "audit_entries");
record!(UserAccount, "user_accounts");
