//! RFC 6238 one-time codes for second-factor login.

use chrono::{DateTime, Utc};
use rand::RngCore;
use thiserror::Error;
use totp_rs::{Algorithm, Secret, TOTP};

const DIGITS: usize = 6;
const SKEW_STEPS: u8 = 1;
const STEP_SECS: u64 = 30;
const SECRET_BYTES: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TotpError {
    #[error("invalid TOTP secret: {0}")]
    Secret(String),

    #[error("cannot build TOTP: {0}")]
    Build(String),
}

/// Issuer-bound TOTP helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpIssuer {
    issuer: String,
}

impl TotpIssuer {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
        }
    }

    /// Fresh random secret, base32 encoded without padding.
    pub fn generate_secret(&self) -> String {
        let mut bytes = vec![0u8; SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        match Secret::Raw(bytes).to_encoded() {
            Secret::Encoded(encoded) => encoded,
            Secret::Raw(_) => String::new(),
        }
    }

    /// `otpauth://totp/...` URI to hand to an authenticator app.
    pub fn provisioning_uri(&self, secret: &str, account: &str) -> Result<String, TotpError> {
        Ok(self.build(secret, account)?.get_url())
    }

    pub fn verify(&self, secret: &str, account: &str, code: &str, now: DateTime<Utc>) -> Result<bool, TotpError> {
        let code = code.trim();
        if code.len() != DIGITS || !code.chars().all(|c| c.is_ascii_digit()) {
            return Ok(false);
        }
        Ok(self.build(secret, account)?.check(code, unix_secs(now)))
    }

    pub fn code_at(&self, secret: &str, account: &str, now: DateTime<Utc>) -> Result<String, TotpError> {
        Ok(self.build(secret, account)?.generate(unix_secs(now)))
    }

    fn build(&self, secret: &str, account: &str) -> Result<TOTP, TotpError> {
        let bytes = Secret::Encoded(secret.to_string())
            .to_bytes()
            .map_err(|e| TotpError::Secret(format!("{e:?}")))?;
        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW_STEPS,
            STEP_SECS,
            bytes,
            Some(self.issuer.clone()),
            account.to_string(),
        )
        .map_err(|e| TotpError::Build(format!("{e:?}")))
    }
}

fn unix_secs(now: DateTime<Utc>) -> u64 {
    u64::try_from(now.timestamp()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn issuer() -> TotpIssuer {
        TotpIssuer::new("Employment Management System")
    }

    #[test]
    fn generated_code_verifies() {
        let totp = issuer();
        let secret = totp.generate_secret();
        let now = Utc::now();
        let code = totp.code_at(&secret, "ada@example.com", now).unwrap();

        assert_eq!(code.len(), 6);
        assert!(totp.verify(&secret, "ada@example.com", &code, now).unwrap());
        assert!(totp
            .verify(&secret, "ada@example.com", &code, now + Duration::seconds(30))
            .unwrap());
        assert!(!totp
            .verify(&secret, "ada@example.com", &code, now + Duration::minutes(10))
            .unwrap());
    }

    #[test]
    fn malformed_codes_are_rejected_without_error() {
        let totp = issuer();
        let secret = totp.generate_secret();
        assert!(!totp.verify(&secret, "a@example.com", "12ab56", Utc::now()).unwrap());
        assert!(!totp.verify(&secret, "a@example.com", "", Utc::now()).unwrap());
    }

    #[test]
    fn provisioning_uri_names_issuer_and_account() {
        let totp = issuer();
        let secret = totp.generate_secret();
        let uri = totp.provisioning_uri(&secret, "ada@example.com").unwrap();
        assert!(uri.starts_with("otpauth://totp/"));
        assert!(uri.contains(&format!("secret={secret}")));
    }

    #[test]
    fn bad_secret_is_an_error() {
        assert!(issuer().provisioning_uri("!!!", "a@example.com").is_err());
    }
}
