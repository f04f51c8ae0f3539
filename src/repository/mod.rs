//! Domain operations on todos, expressed as calls against a [`TodoStore`].

mod model;

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::store::{StoreError, TodoRow, TodoStore};

pub use model::Todo;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Default, Clone, Copy)]
pub struct GetParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl GetParams {
    /// `(page, limit)` with missing or zero values replaced by the defaults.
    pub fn resolve(&self) -> (u32, u32) {
        (
            self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct TodoPage {
    pub pages: u64,
    pub total: u64,
    pub todos: Vec<Todo>,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Failed to fetch data")]
    Fetch(#[source] StoreError),

    #[error("Failed to create ToDo")]
    Create(#[source] StoreError),

    #[error("Failed to update ToDo")]
    Update(#[source] StoreError),

    #[error("ToDo with id: {0} not found")]
    NotFound(String),

    #[error("Page {page} with limit {limit} is out of range")]
    OutOfRange { page: u32, limit: u32 },

    #[error("Failed to parse {0} returned by the store")]
    InvalidRecord(&'static str),
}

/// Zero-based inclusive row range covered by `page`, or `None` when the
/// bounds do not fit in an `i64`.
pub fn page_range(page: u32, limit: u32) -> Option<(i64, i64)> {
    let (page, limit) = (i64::from(page), i64::from(limit));
    let start = page.checked_sub(1)?.checked_mul(limit)?;
    let end = page.checked_mul(limit)?.checked_sub(1)?;
    Some((start, end))
}

pub fn page_count(total: u64, limit: u32) -> u64 {
    total.div_ceil(u64::from(limit))
}

#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn TodoStore>,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// One page of todos, newest first. A missing or zero `page`/`limit`
    /// falls back to the defaults.
    pub async fn get(&self, params: GetParams) -> Result<TodoPage, RepositoryError> {
        let (page, limit) = params.resolve();
        let (start, end) =
            page_range(page, limit).ok_or(RepositoryError::OutOfRange { page, limit })?;

        let range = self.store.range(start, end).await.map_err(|e| {
            tracing::error!(error = %e, page, limit, "failed to fetch todos");
            RepositoryError::Fetch(e)
        })?;

        let todos = range
            .rows
            .into_iter()
            .map(Todo::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                tracing::error!(error = %e, "store returned an invalid todo");
                RepositoryError::InvalidRecord("todos")
            })?;

        let total = u64::try_from(range.total).unwrap_or(todos.len() as u64);

        tracing::debug!(page, limit, total, returned = todos.len(), "fetched todos");

        Ok(TodoPage {
            pages: page_count(total, limit),
            total,
            todos,
        })
    }

    pub async fn create_by_content(&self, content: &str) -> Result<Todo, RepositoryError> {
        let row = self.store.insert(content).await.map_err(|e| {
            tracing::error!(error = %e, "failed to insert todo");
            RepositoryError::Create(e)
        })?;

        let todo = to_todo(row, "created ToDo")?;
        tracing::debug!(id = %todo.id, "created todo");
        Ok(todo)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Todo, RepositoryError> {
        let row = self
            .store
            .find_by_id(id)
            .await
            .map_err(RepositoryError::Fetch)?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        to_todo(row, "ToDo")
    }

    /// Flips `done`. The read and the write are separate store calls, so two
    /// concurrent toggles of one id can collapse into a single flip.
    pub async fn toggle_done(&self, id: Uuid) -> Result<Todo, RepositoryError> {
        let current = self.get_by_id(id).await?;

        let row = self
            .store
            .update_done(id, !current.done)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %id, "failed to toggle todo");
                RepositoryError::Update(e)
            })?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let todo = to_todo(row, "updated ToDo")?;
        tracing::debug!(%id, done = todo.done, "toggled todo");
        Ok(todo)
    }

    /// Any delete failure is reported as not-found.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        match self.store.delete_by_id(id).await {
            Ok(0) => Err(RepositoryError::NotFound(id.to_string())),
            Ok(_) => {
                tracing::debug!(%id, "deleted todo");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "delete failed, reporting as not found");
                Err(RepositoryError::NotFound(id.to_string()))
            }
        }
    }
}

fn to_todo(row: TodoRow, what: &'static str) -> Result<Todo, RepositoryError> {
    Todo::try_from(row).map_err(|e| {
        tracing::error!(error = %e, "store returned an invalid {}", what);
        RepositoryError::InvalidRecord(what)
    })
}
