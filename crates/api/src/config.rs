//! Process configuration, read from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Duration;
use thiserror::Error;

use filmrental_auth::SessionConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Bootstrap account created at startup when both variables are present.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub session: SessionConfig,
    pub admin: Option<AdminSeed>,
    pub database_url: Option<String>,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("session", &self.session)
            .field("admin", &self.admin)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .finish_non_exhaustive()
    }
}

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_ACCESS_TTL_MINUTES: i64 = 600;
const DEFAULT_REFRESH_TTL_HOURS: i64 = 7 * 24;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let bind_addr: SocketAddr = parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR)?;

        let access_minutes = positive(
            "ACCESS_TOKEN_TTL_MINUTES",
            get("ACCESS_TOKEN_TTL_MINUTES"),
            DEFAULT_ACCESS_TTL_MINUTES,
        )?;
        let refresh_hours = positive(
            "REFRESH_TOKEN_TTL_HOURS",
            get("REFRESH_TOKEN_TTL_HOURS"),
            DEFAULT_REFRESH_TTL_HOURS,
        )?;

        let admin = match (get("ADMIN_USERNAME"), get("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminSeed { username, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_USERNAME")),
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            session: SessionConfig {
                access_ttl: Duration::minutes(access_minutes),
                refresh_ttl: Duration::hours(refresh_hours),
            },
            admin,
            database_url: get("DATABASE_URL"),
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: core::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn positive(key: &'static str, raw: Option<String>, default: i64) -> Result<i64, ConfigError> {
    let n = parse_or(key, raw, default)?;
    if n <= 0 {
        return Err(ConfigError::Invalid {
            key,
            value: n.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
        assert_eq!(
            config(&[("JWT_SECRET", "  ")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&[("JWT_SECRET", "12345678901234567890123456789012")]).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.session, SessionConfig::default());
        assert!(cfg.admin.is_none());
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("JWT_SECRET", "12345678901234567890123456789012"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("ACCESS_TOKEN_TTL_MINUTES", "15"),
            ("REFRESH_TOKEN_TTL_HOURS", "24"),
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "changeme"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.session.access_ttl, Duration::minutes(15));
        assert_eq!(cfg.session.refresh_ttl, Duration::hours(24));
        assert_eq!(cfg.admin.as_ref().unwrap().username, "root");
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = config(&[
            ("JWT_SECRET", "12345678901234567890123456789012"),
            ("ACCESS_TOKEN_TTL_MINUTES", "soon"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ACCESS_TOKEN_TTL_MINUTES", .. }));

        let err = config(&[
            ("JWT_SECRET", "12345678901234567890123456789012"),
            ("REFRESH_TOKEN_TTL_HOURS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "REFRESH_TOKEN_TTL_HOURS", .. }));
    }

    #[test]
    fn half_configured_admin_is_an_error() {
        let err = config(&[
            ("JWT_SECRET", "12345678901234567890123456789012"),
            ("ADMIN_USERNAME", "root"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("ADMIN_PASSWORD"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = config(&[
            ("JWT_SECRET", "12345678901234567890123456789012"),
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "changeme"),
        ])
        .unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("1234567890"));
        assert!(!rendered.contains("changeme"));
    }
}
