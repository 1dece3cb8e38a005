//! Service wiring: one instance of every application service, shared by all
//! handlers through an `Extension<Arc<AppServices>>`.

use std::sync::Arc;

use workforce_auth::{Hs512Jwt, TotpIssuer};
use workforce_infra::config::AppConfig;
use workforce_infra::mail::Mailer;
use workforce_infra::services::{
    AccountService, AccountSettings, AuditService, AuditTrail, ContractService, DashboardService,
    DepartmentService, DocumentService, EmployeeService, PositionService, SalaryService, SearchService,
    Stores, TimeOffService, UserService,
};

pub struct AppServices {
    pub departments: DepartmentService,
    pub positions: PositionService,
    pub employees: EmployeeService,
    pub salaries: SalaryService,
    pub contracts: ContractService,
    pub documents: DocumentService,
    pub time_off: TimeOffService,
    pub audit: AuditService,
    pub dashboard: DashboardService,
    pub search: SearchService,
    pub accounts: AccountService,
    pub users: UserService,
}

impl AppServices {
    pub fn new(config: &AppConfig, stores: Stores, mailer: Arc<dyn Mailer>, jwt: Arc<Hs512Jwt>) -> Self {
        let trail = AuditTrail::new(stores.audit.clone());
        let settings = AccountSettings {
            admin_key: config.auth.admin_key.clone(),
            password_reset_ttl: config.password_reset_ttl(),
        };

        Self {
            departments: DepartmentService::new(stores.clone(), trail.clone()),
            positions: PositionService::new(stores.clone(), trail.clone()),
            employees: EmployeeService::new(stores.clone(), trail.clone()),
            salaries: SalaryService::new(stores.clone(), trail.clone()),
            contracts: ContractService::new(stores.clone(), trail.clone()),
            documents: DocumentService::new(stores.clone(), trail.clone()),
            time_off: TimeOffService::new(stores.clone(), trail),
            audit: AuditService::new(stores.clone()),
            dashboard: DashboardService::new(stores.clone()),
            search: SearchService::new(stores.clone()),
            accounts: AccountService::new(
                stores.clone(),
                mailer,
                jwt,
                TotpIssuer::new(config.auth.totp_issuer.clone()),
                settings,
            ),
            users: UserService::new(stores),
        }
    }
}
