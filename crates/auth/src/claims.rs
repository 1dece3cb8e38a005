use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use workforce_core::UserId;

use crate::Role;

/// Distinguishes short-lived access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the account id.
    pub sub: UserId,

    pub email: String,

    pub role: Role,

    pub kind: TokenKind,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("wrong token kind")]
    WrongKind,
}

/// Deterministically validate decoded claims against `now` and the kind of
/// token the caller expects.
pub fn validate_claims(
    claims: &JwtClaims,
    expected: TokenKind,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.kind != expected {
        return Err(TokenValidationError::WrongKind);
    }
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn claims(kind: TokenKind) -> JwtClaims {
        let iat = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        JwtClaims {
            sub: UserId::new(),
            email: "a@example.com".to_string(),
            role: Role::User,
            kind,
            issued_at: iat,
            expires_at: iat + Duration::hours(1),
        }
    }

    #[test]
    fn accepts_inside_window() {
        let c = claims(TokenKind::Access);
        assert!(validate_claims(&c, TokenKind::Access, c.issued_at + Duration::minutes(5)).is_ok());
    }

    #[test]
    fn rejects_expired_and_future() {
        let c = claims(TokenKind::Access);
        assert_eq!(
            validate_claims(&c, TokenKind::Access, c.expires_at),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(
            validate_claims(&c, TokenKind::Access, c.issued_at - Duration::seconds(1)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let c = claims(TokenKind::Refresh);
        assert_eq!(
            validate_claims(&c, TokenKind::Access, c.issued_at),
            Err(TokenValidationError::WrongKind)
        );
    }

    #[test]
    fn timestamps_serialize_as_unix_seconds() {
        let c = claims(TokenKind::Access);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["iat"], c.issued_at.timestamp());
        assert_eq!(json["kind"], "access");
        assert_eq!(json["role"], "User");
    }
}
