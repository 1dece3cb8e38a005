//! `workforce-auth`: authentication and authorization primitives.
//!
//! Token signing, password hashing and TOTP live here; HTTP and storage do not.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod password;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod totp;
pub mod user;

pub use authorize::{authorize, AuthzError};
pub use claims::{validate_claims, JwtClaims, TokenKind, TokenValidationError};
pub use jwt::{Hs512Jwt, JwtValidator, TokenError, TokenPair};
pub use password::{check_strength, hash_password, verify_password, PasswordError};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::Role;
pub use totp::{TotpError, TotpIssuer};
pub use user::UserAccount;
