//! Error types for wishctl-server

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::config::ConfigError;
use crate::http::ServerError;
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for starting and running the service
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_config_errors() {
        let err: Error = ConfigError::InvalidPort("x".into()).into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("configuration error: invalid PORT 'x'"));
    }
}
