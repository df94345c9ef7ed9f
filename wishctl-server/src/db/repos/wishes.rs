//! Wish repository over SQLite
//!
//! - create: single `INSERT ... RETURNING id`, so SQLite assigns ids
//! - list: newest first, ties broken by id
//! - delete: checks `rows_affected`, no check-then-delete

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::db::pool::{connect, connect_in_memory, DatabaseLocation};
use crate::models::{NewWish, Wish, WishId};
use crate::store::{StoreError, WishStore};

const SCHEMA: &str = include_str!("../schema.sql");

/// Wish row as stored in the `wishes` table
#[derive(Debug, Clone, FromRow)]
struct WishRow {
    id: i64,
    name: String,
    wish: String,
    created_at: String,
}

impl TryFrom<WishRow> for Wish {
    type Error = StoreError;

    fn try_from(row: WishRow) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| StoreError::CorruptRow {
                id: row.id,
                reason: format!("created_at '{}': {}", row.created_at, e),
            })?
            .with_timezone(&Utc);

        Ok(Wish {
            id: row.id,
            name: row.name,
            wish: row.wish,
            created_at,
        })
    }
}

/// Fixed-width RFC 3339 so lexical order in SQL matches time order.
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite-backed [`WishStore`]
#[derive(Debug, Clone)]
pub struct SqliteWishStore {
    pool: SqlitePool,
}

impl SqliteWishStore {
    /// Open the store at `location`, creating the schema if needed.
    pub async fn open(location: &DatabaseLocation) -> Result<Self, StoreError> {
        let pool = match location {
            DatabaseLocation::File(path) => connect(path).await?,
            DatabaseLocation::Memory => connect_in_memory().await?,
        };
        Self::from_pool(pool).await
    }

    /// Fresh in-memory store (tests, demos).
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(&DatabaseLocation::Memory).await
    }

    /// Wrap an existing pool, applying the schema.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Close all pooled connections, flushing the WAL.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl WishStore for SqliteWishStore {
    async fn create(&self, new: NewWish) -> Result<Wish, StoreError> {
        let created_at = Utc::now().trunc_subsecs(6);
        let mut conn = self.pool.acquire().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO wishes (name, wish, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new.name.as_str())
        .bind(new.wish.as_str())
        .bind(encode_timestamp(created_at))
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!(id, "wish created");

        Ok(Wish {
            id,
            name: new.name.into_string(),
            wish: new.wish.into_string(),
            created_at,
        })
    }

    async fn list(&self) -> Result<Vec<Wish>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let rows: Vec<WishRow> = sqlx::query_as(
            r#"
            SELECT id, name, wish, created_at
            FROM wishes
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter().map(Wish::try_from).collect()
    }

    async fn get(&self, id: WishId) -> Result<Wish, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let row: WishRow =
            sqlx::query_as("SELECT id, name, wish, created_at FROM wishes WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or(StoreError::NotFound { id })?;

        Wish::try_from(row)
    }

    async fn delete(&self, id: WishId) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM wishes WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        tracing::debug!(id, "wish deleted");
        Ok(())
    }
}
