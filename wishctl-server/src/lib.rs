//! wishctl-server: persistent wish records over HTTP
//!
//! A small record store (create / list / get / delete) backed by SQLite,
//! exposed as a JSON API with configurable CORS.

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use db::{DatabaseLocation, SqliteWishStore};
pub use error::{Error, Result};
pub use models::{NewWish, Wish, WishId};
pub use state::AppState;
pub use store::{StoreError, WishStore};

/// Bootstrap the backing store, open it and serve until shutdown.
pub async fn serve(config: ServerConfig) -> Result<()> {
    if let Some(report) = bootstrap::init_location(&config.database)? {
        tracing::info!(
            path = %report.path.display(),
            outcome = ?report.outcome,
            permissions_applied = report.permissions_applied,
            "Database initialization completed"
        );
    }

    tracing::info!("Opening database at {}", config.database);
    let store = SqliteWishStore::open(&config.database).await?;

    let app = http::build_router(AppState::new(store.clone()), &config.cors_origins);
    let served = http::run_server(app, config.bind_addr()).await;

    store.close().await;
    served?;
    Ok(())
}
