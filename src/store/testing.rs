//! Test double that fails chosen store calls and delegates the rest to a
//! [`MemoryTodoStore`].

use async_trait::async_trait;
use uuid::Uuid;

use super::{MemoryTodoStore, RowRange, StoreError, TodoRow, TodoStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Range,
    Insert,
    Find,
    Update,
    Delete,
}

const ALL: [Op; 5] = [Op::Range, Op::Insert, Op::Find, Op::Update, Op::Delete];

#[derive(Default)]
pub struct FailingStore {
    inner: MemoryTodoStore,
    failing: Vec<Op>,
}

impl FailingStore {
    pub fn on(ops: &[Op]) -> Self {
        Self {
            inner: MemoryTodoStore::new(),
            failing: ops.to_vec(),
        }
    }

    pub fn everywhere() -> Self {
        Self::on(&ALL)
    }

    fn check(&self, op: Op) -> Result<(), StoreError> {
        if self.failing.contains(&op) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for FailingStore {
    async fn range(&self, start: i64, end: i64) -> Result<RowRange, StoreError> {
        self.check(Op::Range)?;
        self.inner.range(start, end).await
    }

    async fn insert(&self, content: &str) -> Result<TodoRow, StoreError> {
        self.check(Op::Insert)?;
        self.inner.insert(content).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TodoRow>, StoreError> {
        self.check(Op::Find)?;
        self.inner.find_by_id(id).await
    }

    async fn update_done(&self, id: Uuid, done: bool) -> Result<Option<TodoRow>, StoreError> {
        self.check(Op::Update)?;
        self.inner.update_done(id, done).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        self.check(Op::Delete)?;
        self.inner.delete_by_id(id).await
    }
}
