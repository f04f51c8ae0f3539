use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RowRange, StoreError, TodoRow, TodoStore};

/// Process-local store. Rows are kept oldest first, so the newest-first
/// ordering is a reverse walk.
#[derive(Clone, Default)]
pub struct MemoryTodoStore {
    rows: Arc<RwLock<Vec<TodoRow>>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn range(&self, start: i64, end: i64) -> Result<RowRange, StoreError> {
        let rows = self.rows.read().await;
        let total = rows.len() as i64;

        let start = start.max(0) as usize;
        let take = (end - start as i64 + 1).max(0) as usize;
        let page = rows.iter().rev().skip(start).take(take).cloned().collect();

        Ok(RowRange { rows: page, total })
    }

    async fn insert(&self, content: &str) -> Result<TodoRow, StoreError> {
        let mut rows = self.rows.write().await;

        // dates must stay strictly increasing, even within one clock tick
        let now = Utc::now();
        let date = match rows.last() {
            Some(last) if last.date >= now => last.date + Duration::microseconds(1),
            _ => now,
        };

        let row = TodoRow {
            id: Uuid::new_v4(),
            content: content.to_string(),
            done: false,
            date,
        };
        rows.push(row.clone());

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TodoRow>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn update_done(&self, id: Uuid, done: bool) -> Result<Option<TodoRow>, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            row.done = done;
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok((before - rows.len()) as u64)
    }
}
