//! Service configuration.
//!
//! Loaded from (later sources override earlier):
//! 1. Default values
//! 2. TOML file (`workforce.toml` in the working directory, if present)
//! 3. Environment variables prefixed with `WORKFORCE_`, `__` separating
//!    sections (e.g. `WORKFORCE_AUTH__JWT_SECRET`)

use std::path::{Path, PathBuf};

use chrono::Duration;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "workforce.toml";
const ENV_PREFIX: &str = "WORKFORCE_";

/// Signing secret used when none is configured. Only acceptable for local runs.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub password_reset_ttl_secs: u64,
    /// Shared key required to self-register with the admin role.
    pub admin_key: String,
    pub totp_issuer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL. Without one, records are kept in memory.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// `json` or `pretty`.
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_ttl_secs: 60 * 60,
            refresh_token_ttl_secs: 7 * 24 * 60 * 60,
            password_reset_ttl_secs: 15 * 60,
            admin_key: "admin-key-change-me".to_string(),
            totp_issuer: "Employment Management System".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://localhost:5173".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::from_figment(Self::figment(&config_file))
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt_secret must not be empty".to_string()));
        }
        if self.auth.admin_key.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.admin_key must not be empty".to_string()));
        }
        if self.auth.access_token_ttl_secs == 0 || self.auth.refresh_token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("token lifetimes must be greater than 0".to_string()));
        }
        if self.auth.password_reset_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "auth.password_reset_ttl_secs must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        if !matches!(self.log.format.as_str(), "json" | "pretty") {
            return Err(ConfigError::Invalid(format!(
                "log.format must be json or pretty, got {}",
                self.log.format
            )));
        }
        Ok(())
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_JWT_SECRET
    }

    pub fn access_token_ttl(&self) -> Duration {
        secs(self.auth.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        secs(self.auth.refresh_token_ttl_secs)
    }

    pub fn password_reset_ttl(&self) -> Duration {
        secs(self.auth.password_reset_ttl_secs)
    }
}

fn secs(value: u64) -> Duration {
    Duration::seconds(i64::try_from(value).unwrap_or(i64::MAX / 1_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.auth.refresh_token_ttl_secs, 604_800);
        assert_eq!(config.password_reset_ttl(), Duration::minutes(15));
        assert!(config.database.url.is_none());
        assert!(config.uses_dev_secret());
    }

    #[test]
    fn toml_overrides_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string(
                r#"
                [auth]
                jwt_secret = "from-file"
                access_token_ttl_secs = 120

                [database]
                url = "postgres://localhost/workforce"
                "#,
            ));
        let config = AppConfig::from_figment(figment).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.access_token_ttl(), Duration::minutes(2));
        assert_eq!(config.auth.totp_issuer, "Employment Management System");
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/workforce"));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut config = AppConfig::default();
        config.auth.access_token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut config = AppConfig::default();
        config.log.format = "xml".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
