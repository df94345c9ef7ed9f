//! Database layer - connection pool and repositories
//!
//! - SQLite through a small sqlx pool; no Arc<Mutex<Connection>>
//! - Each store operation acquires its own pooled connection
//! - Schema is applied idempotently on open

pub mod pool;
pub mod repos;

pub use pool::{connect, connect_in_memory, DatabaseLocation};
pub use repos::SqliteWishStore;
