//! Client side of the todo API: an HTTP repository mirroring the routes and
//! a controller that front-ends drive.

pub mod controller;
pub mod repository;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use controller::{filter_todos_by_content, HasContent, TodoController};
pub use repository::{parse_todos_from_server, HttpTodoClient};

/// A todo as seen by clients. Fields are kept loose because the payload
/// comes over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub content: String,
    pub done: bool,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("unexpected response body: {0}")]
    Malformed(String),
}

/// The API surface a controller needs.
#[async_trait]
pub trait TodoGateway: Send + Sync {
    async fn get(&self, page: u32, limit: u32) -> Result<TodoPage, ClientError>;

    async fn create(&self, content: &str) -> Result<Todo, ClientError>;

    async fn toggle_done(&self, id: &str) -> Result<Todo, ClientError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), ClientError>;
}
