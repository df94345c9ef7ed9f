//! HTTP server command
//!
//! Settings come from the environment (see `wishctl_server::config`);
//! flags given here take precedence and replace the variable entirely.

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Parser;

use wishctl_server::config::{ConfigError, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (overrides HOST, default 0.0.0.0)
    #[arg(long, short = 'b')]
    pub bind: Option<IpAddr>,

    /// Port to listen on (overrides PORT, default 8000)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Database URL or path (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Comma-separated allowed origins (overrides CORS_ORIGINS)
    #[arg(long)]
    pub cors_origins: Option<String>,
}

impl ServeArgs {
    /// Flag value standing in for an environment variable
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "HOST" => self.bind.map(|host| host.to_string()),
            "PORT" => self.port.map(|port| port.to_string()),
            "DATABASE_URL" => self.database_url.clone(),
            "CORS_ORIGINS" => self.cors_origins.clone(),
            _ => None,
        }
    }

    /// Build the config from flags, falling back to `env` for anything unset.
    ///
    /// Only values that are actually used get validated, so a broken
    /// environment variable is harmless when its flag is given.
    pub fn config<F>(&self, env: F) -> Result<ServerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        ServerConfig::from_lookup(|key: &str| self.lookup(key).or_else(|| env(key)))
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args
        .config(|key| std::env::var(key).ok())
        .context("Invalid server configuration")?;

    tracing::info!("Starting wishctl server on {}", config.bind_addr());

    // Run server (blocks until shutdown)
    wishctl_server::serve(config).await.context("Server error")?;

    Ok(())
}
