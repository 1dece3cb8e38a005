//! Sign-up, email verification, login, token refresh, password reset and
//! second-factor management.
//!
//! Verification codes and reset tokens are held in process memory; a restart
//! invalidates them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use workforce_auth::{
    check_strength, hash_password, verify_password, Hs512Jwt, Role, TokenKind, TotpIssuer, UserAccount,
};
use workforce_core::text::normalize_email;
use workforce_core::UserId;

use crate::mail::{Mailer, OutgoingMail};

use super::{ServiceError, ServiceResult, Stores};

const VERIFICATION_CODE_LEN: usize = 6;
const RESET_TOKEN_LEN: usize = 32;
const USER_NOT_FOUND: &str = "User not found";
const INVALID_2FA_CODE: &str = "Invalid 2FA code";

#[derive(Debug, Clone)]
pub struct AccountSettings {
    pub admin_key: String,
    pub password_reset_ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub admin_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupOutcome {
    pub email: String,
    pub role: Role,
    pub two_factor_enabled: bool,
    /// `otpauth://` URI for an authenticator app.
    pub two_factor_uri: String,
    pub linked_to_employee: bool,
}

/// Tokens plus the account facts a client needs after login or refresh.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub refresh_token: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
    pub email: String,
    pub role: Role,
    pub two_factor_enabled: bool,
}

#[derive(Debug, Clone)]
struct PendingReset {
    email: String,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
struct PendingCodes {
    verification: HashMap<String, String>,
    resets: HashMap<String, PendingReset>,
}

#[derive(Clone)]
pub struct AccountService {
    stores: Stores,
    mailer: Arc<dyn Mailer>,
    jwt: Arc<Hs512Jwt>,
    totp: TotpIssuer,
    settings: AccountSettings,
    pending: Arc<RwLock<PendingCodes>>,
}

impl AccountService {
    pub fn new(
        stores: Stores,
        mailer: Arc<dyn Mailer>,
        jwt: Arc<Hs512Jwt>,
        totp: TotpIssuer,
        settings: AccountSettings,
    ) -> Self {
        Self {
            stores,
            mailer,
            jwt,
            totp,
            settings,
            pending: Arc::new(RwLock::new(PendingCodes::default())),
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<SignupOutcome> {
        let email = normalize_email(&request.email);
        if email.is_empty() {
            return Err(ServiceError::validation("email cannot be empty"));
        }
        if self.find(&email).await?.is_some() {
            return Err(ServiceError::conflict("Email is already in use"));
        }
        check_strength(&request.password).map_err(|e| ServiceError::validation(e.to_string()))?;

        let role = request.role.unwrap_or_default();
        if role == Role::Admin {
            let key_ok = request
                .admin_key
                .as_deref()
                .is_some_and(|key| key.eq_ignore_ascii_case(&self.settings.admin_key));
            if !key_ok {
                tracing::warn!(%email, "admin signup with invalid key");
                return Err(ServiceError::forbidden("Invalid admin key"));
            }
        }

        let hash = hash_password(&request.password).map_err(|e| ServiceError::Internal(e.to_string()))?;
        let mut account = UserAccount::new(&email, hash, role, Utc::now());

        let employee = self
            .stores
            .employees
            .list()
            .await?
            .into_iter()
            .find(|e| e.has_email(&email));
        if let Some(employee) = &employee {
            account.link_employee(employee.id);
        }

        let secret = self.totp.generate_secret();
        let two_factor_uri = self
            .totp
            .provisioning_uri(&secret, &email)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        account.two_factor_secret = Some(secret);
        account.two_factor_enabled = false;

        self.stores.accounts.put(&account).await?;

        let code = random_string(VERIFICATION_CODE_LEN);
        self.pending_mut()?.verification.insert(email.clone(), code.clone());
        self.mailer
            .send(OutgoingMail {
                to: email.clone(),
                subject: "Verify your email".to_string(),
                body: format!("Your verification code is: {code}"),
            })
            .await?;

        tracing::info!(user_id = %account.id, role = %role, linked = employee.is_some(), "account created");
        Ok(SignupOutcome {
            email,
            role,
            two_factor_enabled: false,
            two_factor_uri,
            linked_to_employee: employee.is_some(),
        })
    }

    pub async fn verify_email(&self, email: &str, code: &str) -> ServiceResult<()> {
        let email = normalize_email(email);
        let matches = self
            .pending_read()?
            .verification
            .get(&email)
            .is_some_and(|pending| pending == code.trim());
        if !matches {
            return Err(ServiceError::validation("Invalid verification code"));
        }

        let mut account = self.require(&email).await?;
        account.email_verified = true;
        self.stores.accounts.put(&account).await?;
        self.pending_mut()?.verification.remove(&email);
        tracing::info!(user_id = %account.id, "email verified");
        Ok(())
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        totp_code: Option<&str>,
    ) -> ServiceResult<AuthSession> {
        let email = normalize_email(email);
        let account = match self.find(&email).await? {
            Some(account) if verify_password(password, &account.password_hash) => account,
            _ => {
                tracing::warn!(%email, "login rejected");
                return Err(ServiceError::unauthenticated("Invalid email or password"));
            }
        };

        if !account.email_verified {
            return Err(ServiceError::forbidden("Email not verified"));
        }

        let now = Utc::now();
        if account.two_factor_enabled {
            let Some(code) = totp_code else {
                return Err(ServiceError::unauthenticated("2FA code required"));
            };
            if !self.check_totp(&account, code, now)? {
                tracing::warn!(user_id = %account.id, "invalid second factor");
                return Err(ServiceError::unauthenticated(INVALID_2FA_CODE));
            }
        }

        let pair = self
            .jwt
            .issue_pair(&account, now)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        tracing::info!(user_id = %account.id, "login");
        Ok(AuthSession {
            token: pair.token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            email: account.email,
            role: account.role,
            two_factor_enabled: account.two_factor_enabled,
        })
    }

    /// New access token for a valid refresh token. The role is read from the
    /// stored account, not from the refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<AuthSession> {
        let now = Utc::now();
        let claims = self
            .jwt
            .verify(refresh_token, TokenKind::Refresh, now)
            .map_err(|e| {
                tracing::warn!(error = %e, "refresh rejected");
                ServiceError::unauthenticated("Invalid refresh token")
            })?;

        let account = self
            .stores
            .accounts
            .get(claims.sub.into())
            .await?
            .ok_or_else(|| ServiceError::unauthenticated("Invalid refresh token"))?;
        let token = self
            .jwt
            .issue(&account, TokenKind::Access, now)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        Ok(AuthSession {
            token,
            refresh_token: refresh_token.to_string(),
            token_type: "Bearer",
            email: account.email,
            role: account.role,
            two_factor_enabled: account.two_factor_enabled,
        })
    }

    pub async fn forgot_password(&self, email: &str) -> ServiceResult<()> {
        let email = normalize_email(email);
        self.require(&email).await?;

        let token = random_string(RESET_TOKEN_LEN);
        let expires_at = Utc::now() + self.settings.password_reset_ttl;
        self.pending_mut()?.resets.insert(
            token.clone(),
            PendingReset {
                email: email.clone(),
                expires_at,
            },
        );

        self.mailer
            .send(OutgoingMail {
                to: email,
                subject: "Password reset".to_string(),
                body: format!("Use this token to reset your password: {token}"),
            })
            .await?;
        Ok(())
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> ServiceResult<()> {
        let now = Utc::now();
        let pending = self
            .pending_read()?
            .resets
            .get(token.trim())
            .filter(|r| r.expires_at > now)
            .cloned();
        let Some(pending) = pending else {
            return Err(ServiceError::validation("Invalid or expired reset token"));
        };
        check_strength(new_password).map_err(|e| ServiceError::validation(e.to_string()))?;

        let mut account = self.require(&pending.email).await?;
        account.password_hash =
            hash_password(new_password).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.stores.accounts.put(&account).await?;
        self.pending_mut()?.resets.remove(token.trim());
        tracing::info!(user_id = %account.id, "password reset");
        Ok(())
    }

    /// Replace the TOTP secret and return its provisioning URI.
    pub async fn generate_two_factor_secret(&self, user_id: UserId) -> ServiceResult<String> {
        let mut account = self.require_id(user_id).await?;
        let secret = self.totp.generate_secret();
        let uri = self
            .totp
            .provisioning_uri(&secret, &account.email)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        account.two_factor_secret = Some(secret);
        self.stores.accounts.put(&account).await?;
        Ok(uri)
    }

    pub async fn verify_two_factor_code(&self, user_id: UserId, code: &str) -> ServiceResult<bool> {
        let account = self.require_id(user_id).await?;
        self.check_totp(&account, code, Utc::now())
    }

    pub async fn enable_two_factor(&self, user_id: UserId, code: &str) -> ServiceResult<()> {
        self.set_two_factor(user_id, code, true).await
    }

    pub async fn disable_two_factor(&self, user_id: UserId, code: &str) -> ServiceResult<()> {
        self.set_two_factor(user_id, code, false).await
    }

    async fn set_two_factor(&self, user_id: UserId, code: &str, enabled: bool) -> ServiceResult<()> {
        let mut account = self.require_id(user_id).await?;
        if !self.check_totp(&account, code, Utc::now())? {
            return Err(ServiceError::validation(INVALID_2FA_CODE));
        }
        account.two_factor_enabled = enabled;
        self.stores.accounts.put(&account).await?;
        tracing::info!(user_id = %account.id, enabled, "two-factor setting changed");
        Ok(())
    }

    fn check_totp(&self, account: &UserAccount, code: &str, now: DateTime<Utc>) -> ServiceResult<bool> {
        let Some(secret) = account.two_factor_secret.as_deref() else {
            return Ok(false);
        };
        self.totp
            .verify(secret, &account.email, code, now)
            .map_err(|e| ServiceError::Internal(e.to_string()))
    }

    async fn find(&self, email: &str) -> ServiceResult<Option<UserAccount>> {
        Ok(self
            .stores
            .accounts
            .list()
            .await?
            .into_iter()
            .find(|a| a.has_email(email)))
    }

    async fn require(&self, email: &str) -> ServiceResult<UserAccount> {
        self.find(email)
            .await?
            .ok_or_else(|| ServiceError::not_found(USER_NOT_FOUND))
    }

    async fn require_id(&self, user_id: UserId) -> ServiceResult<UserAccount> {
        super::require(&self.stores.accounts, user_id, USER_NOT_FOUND).await
    }

    fn pending_read(&self) -> ServiceResult<std::sync::RwLockReadGuard<'_, PendingCodes>> {
        self.pending
            .read()
            .map_err(|_| ServiceError::Internal("pending code table poisoned".to_string()))
    }

    fn pending_mut(&self) -> ServiceResult<std::sync::RwLockWriteGuard<'_, PendingCodes>> {
        self.pending
            .write()
            .map_err(|_| ServiceError::Internal("pending code table poisoned".to_string()))
    }
}

fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
