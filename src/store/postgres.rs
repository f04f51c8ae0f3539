use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RowRange, StoreError, TodoRow, TodoStore};

#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn range(&self, start: i64, end: i64) -> Result<RowRange, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM todo")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, content, done, date
            FROM todo
            ORDER BY date DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind((end - start + 1).max(0))
        .bind(start.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(RowRange { rows, total })
    }

    async fn insert(&self, content: &str) -> Result<TodoRow, StoreError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todo (content)
            VALUES ($1)
            RETURNING id, content, done, date
            "#,
        )
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TodoRow>, StoreError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, content, done, date
            FROM todo
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_done(&self, id: Uuid, done: bool) -> Result<Option<TodoRow>, StoreError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todo
            SET done = $2
            WHERE id = $1
            RETURNING id, content, done, date
            "#,
        )
        .bind(id)
        .bind(done)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
