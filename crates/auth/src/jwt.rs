//! HS512 token issuing and verification.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, JwtClaims, TokenKind, TokenValidationError};
use crate::UserAccount;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed or badly signed token: {0}")]
    Invalid(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Verifies bearer tokens presented to protected endpoints.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Access + refresh token pair returned on login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
}

/// Symmetric (HS512) token service.
#[derive(Clone)]
pub struct Hs512Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl core::fmt::Debug for Hs512Jwt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs512Jwt")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl Hs512Jwt {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue(
        &self,
        account: &UserAccount,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = JwtClaims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            kind,
            issued_at: now,
            expires_at: now + ttl,
        };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn issue_pair(&self, account: &UserAccount, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            token: self.issue(account, TokenKind::Access, now)?,
            refresh_token: self.issue(account, TokenKind::Refresh, now)?,
            token_type: "Bearer",
        })
    }

    /// Decode and check a token of the expected kind.
    pub fn verify(&self, token: &str, expected: TokenKind, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        // Expiry is checked by `validate_claims` against the caller's clock.
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<JwtClaims>(token, &self.decoding, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        validate_claims(&data.claims, expected, now)?;
        Ok(data.claims)
    }
}

impl JwtValidator for Hs512Jwt {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        self.verify(token, TokenKind::Access, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn service() -> Hs512Jwt {
        Hs512Jwt::new(b"unit-test-secret", Duration::hours(1), Duration::days(7))
    }

    fn account() -> UserAccount {
        UserAccount::new("hr@example.com", "$argon2id$placeholder".to_string(), Role::Admin, Utc::now())
    }

    #[test]
    fn issued_access_token_validates() {
        let jwt = service();
        let acct = account();
        let now = Utc::now();
        let token = jwt.issue(&acct, TokenKind::Access, now).unwrap();

        let claims = jwt.validate(&token, now).unwrap();
        assert_eq!(claims.sub, acct.id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.email, "hr@example.com");
    }

    #[test]
    fn refresh_token_cannot_be_used_as_access_token() {
        let jwt = service();
        let now = Utc::now();
        let pair = jwt.issue_pair(&account(), now).unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert!(matches!(
            jwt.validate(&pair.refresh_token, now),
            Err(TokenError::Claims(TokenValidationError::WrongKind))
        ));
        assert!(jwt.verify(&pair.refresh_token, TokenKind::Refresh, now).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = service();
        let now = Utc::now();
        let token = jwt.issue(&account(), TokenKind::Access, now).unwrap();

        assert!(matches!(
            jwt.validate(&token, now + Duration::hours(2)),
            Err(TokenError::Claims(TokenValidationError::Expired))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let now = Utc::now();
        let other = Hs512Jwt::new(b"another-secret", Duration::hours(1), Duration::days(7));
        let token = other.issue(&account(), TokenKind::Access, now).unwrap();

        assert!(matches!(service().validate(&token, now), Err(TokenError::Invalid(_))));
    }
}
