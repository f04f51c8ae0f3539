pub mod memory;
pub mod postgres;
#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::config::Config;

pub use memory::MemoryTodoStore;
pub use postgres::PgTodoStore;

// MODELS

/// A row of the `todo` collection exactly as the store hands it back.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TodoRow {
    pub id: Uuid,
    pub content: String,
    pub done: bool,
    pub date: DateTime<Utc>,
}

/// One page of rows plus the exact size of the whole collection.
#[derive(Debug, Default)]
pub struct RowRange {
    pub rows: Vec<TodoRow>,
    pub total: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Capabilities of the external record store, scoped to the `todo` collection.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Rows `start..=end` (zero based) ordered by `date`, newest first.
    async fn range(&self, start: i64, end: i64) -> Result<RowRange, StoreError>;

    /// Inserts one row; `id`, `done` and `date` are assigned by the store.
    async fn insert(&self, content: &str) -> Result<TodoRow, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TodoRow>, StoreError>;

    async fn update_done(&self, id: Uuid, done: bool) -> Result<Option<TodoRow>, StoreError>;

    /// Returns the number of rows removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError>;
}

/// Opens the configured store: Postgres when `DATABASE_URL` is set (with
/// pending migrations applied), otherwise an in-memory one.
pub async fn connect(config: &Config) -> Result<Arc<dyn TodoStore>, StoreError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, todos are kept in memory only");
        return Ok(Arc::new(MemoryTodoStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("connected to postgres, migrations applied");

    Ok(Arc::new(PgTodoStore::new(pool)))
}
