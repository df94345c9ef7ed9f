//! Record store abstraction
//!
//! Handlers only see [`WishStore`]; the SQLite implementation lives in
//! [`crate::db::repos::wishes`]. The handle is built once at startup and
//! injected through router state.

use async_trait::async_trait;

use crate::models::{NewWish, Wish, WishId};

/// Record store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("wish {id} not found")]
    NotFound { id: WishId },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("wish {id} has an unreadable row: {reason}")]
    CorruptRow { id: WishId, reason: String },
}

/// Durable CRUD over wish records.
///
/// There is no update operation: a wish is created once and later deleted.
#[async_trait]
pub trait WishStore: Send + Sync {
    /// Persist a new wish, assigning its id and creation timestamp.
    async fn create(&self, new: NewWish) -> Result<Wish, StoreError>;

    /// All wishes, most recent first.
    async fn list(&self) -> Result<Vec<Wish>, StoreError>;

    /// A single wish by id.
    async fn get(&self, id: WishId) -> Result<Wish, StoreError>;

    /// Remove a wish. Deleting an id that is already gone is `NotFound`.
    async fn delete(&self, id: WishId) -> Result<(), StoreError>;
}
