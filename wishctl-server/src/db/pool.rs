//! SQLite connection pool management
//!
//! `DATABASE_URL` accepts the SQLAlchemy-style `sqlite:///relative.db` and
//! `sqlite:////absolute.db` forms the service has always been deployed with,
//! plus `sqlite::memory:` and bare filesystem paths.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use crate::config::ConfigError;

/// Default maximum connections for the pool.
/// SQLite serializes writers anyway; this only bounds concurrent readers.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on a locked database before SQLITE_BUSY.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the backing store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A durable SQLite file
    File(PathBuf),
    /// Process-local, lost on exit
    Memory,
}

impl DatabaseLocation {
    /// Parse a database URL or path.
    ///
    /// # Example
    /// ```
    /// use std::path::PathBuf;
    /// use wishctl_server::db::DatabaseLocation;
    ///
    /// assert_eq!(
    ///     DatabaseLocation::parse("sqlite:///./data/wishes.db").unwrap(),
    ///     DatabaseLocation::File(PathBuf::from("./data/wishes.db")),
    /// );
    /// assert_eq!(
    ///     DatabaseLocation::parse("sqlite::memory:").unwrap(),
    ///     DatabaseLocation::Memory,
    /// );
    /// ```
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError::UnsupportedDatabaseUrl(url.to_owned()));
        }

        if matches!(url, "sqlite::memory:" | ":memory:" | "sqlite://:memory:") {
            return Ok(Self::Memory);
        }

        let path = if let Some(rest) = url.strip_prefix("sqlite:///") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite:") {
            rest
        } else if url.contains("://") {
            return Err(ConfigError::UnsupportedDatabaseUrl(url.to_owned()));
        } else {
            url
        };

        if path.is_empty() {
            return Err(ConfigError::UnsupportedDatabaseUrl(url.to_owned()));
        }

        Ok(Self::File(PathBuf::from(path)))
    }

    /// Filesystem path, if this is a file-backed location.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Memory => None,
        }
    }
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => f.write_str(":memory:"),
        }
    }
}

/// Open a pool on a SQLite file, creating it if missing.
pub async fn connect(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Open a single-connection in-memory pool.
///
/// Every SQLite in-memory connection is its own database, so the pool keeps
/// exactly one connection alive for its whole lifetime.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}
