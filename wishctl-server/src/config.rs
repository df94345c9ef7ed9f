//! Server configuration - environment loading
//!
//! Configuration is read from environment variables:
//! - `DATABASE_URL`: backing store location (default: sqlite:///./data/wishes.db)
//! - `CORS_ORIGINS`: comma-separated allowed origins (default: http://localhost:3000)
//! - `PORT`: listening port (default: 8000)
//! - `HOST`: bind address (default: 0.0.0.0)
//!
//! Blank values count as unset.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::db::DatabaseLocation;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./data/wishes.db";
const DEFAULT_DATABASE_PATH: &str = "./data/wishes.db";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT '{0}': expected an integer between 0 and 65535")]
    InvalidPort(String),

    #[error("invalid HOST '{0}': expected an IP address")]
    InvalidHost(String),

    #[error("unsupported DATABASE_URL '{0}': expected a sqlite URL or a file path")]
    UnsupportedDatabaseUrl(String),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseLocation,
    /// Allowed origins after wildcard normalisation, see [`parse_origins`]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let host = match get("HOST") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(raw.clone()))?,
            None => DEFAULT_HOST,
        };

        let database = DatabaseLocation::parse(
            get("DATABASE_URL").as_deref().unwrap_or(DEFAULT_DATABASE_URL),
        )?;

        let cors_origins =
            parse_origins(get("CORS_ORIGINS").as_deref().unwrap_or(DEFAULT_CORS_ORIGINS));

        Ok(Self {
            host,
            port,
            database,
            cors_origins,
        })
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            database: DatabaseLocation::File(DEFAULT_DATABASE_PATH.into()),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_owned()))
}

/// Split a comma-separated origin list.
///
/// Blank entries are dropped. Unless some entry already contains `*`, a bare
/// `*` is appended so any origin is accepted.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_owned)
        .collect();

    if !origins.iter().any(|o| o.contains('*')) {
        origins.push("*".to_owned());
    }

    origins
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("./data/wishes.db"))
        );
        assert_eq!(config.cors_origins, vec!["http://localhost:3000", "*"]);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn reads_environment() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("HOST", "127.0.0.1"),
            ("DATABASE_URL", "sqlite:////srv/wishes.db"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("/srv/wishes.db"))
        );
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example", "*"]
        );
    }

    #[test]
    fn blank_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "  ")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_port_is_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
        assert!(config_from(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn invalid_host_is_error() {
        let err = config_from(&[("HOST", "not-an-ip")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost(_)));
    }

    #[test]
    fn wildcard_not_duplicated() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("https://*.example.com"),
            vec!["https://*.example.com"]
        );
        assert_eq!(parse_origins(" , ,"), vec!["*"]);
    }
}
