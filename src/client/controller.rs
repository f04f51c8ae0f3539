use super::{ClientError, Todo, TodoGateway, TodoPage};

/// Page size used by every front-end listing.
pub const PAGE_SIZE: u32 = 10;

pub const DEFAULT_CREATE_ERROR: &str = "You need a content to create a ToDo";
pub const DEFAULT_NETWORK_ERROR: &str = "Could not reach the server";

pub trait HasContent {
    fn content(&self) -> &str;
}

impl HasContent for Todo {
    fn content(&self) -> &str {
        &self.content
    }
}

/// Case-insensitive substring match on `content`. The input is left as is.
pub fn filter_todos_by_content<'a, T: HasContent>(search: &str, todos: &'a [T]) -> Vec<&'a T> {
    let search = search.to_lowercase();
    todos
        .iter()
        .filter(|todo| todo.content().to_lowercase().contains(&search))
        .collect()
}

pub struct TodoController<G> {
    gateway: G,
}

impl<G: TodoGateway> TodoController<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn get(&self, page: u32) -> Result<TodoPage, ClientError> {
        self.gateway.get(page, PAGE_SIZE).await
    }

    /// Calls exactly one of `on_success` / `on_error`. Empty content never
    /// leaves the client.
    pub async fn create(
        &self,
        content: &str,
        on_success: impl FnOnce(Todo),
        on_error: impl FnOnce(String),
    ) {
        if content.is_empty() {
            on_error(DEFAULT_CREATE_ERROR.to_string());
            return;
        }

        match self.gateway.create(content).await {
            Ok(todo) => on_success(todo),
            Err(e) => {
                tracing::warn!(error = %e, "creating todo failed");
                on_error(user_message(&e, DEFAULT_CREATE_ERROR));
            }
        }
    }

    /// Calls exactly one of `update_todo_on_screen` / `on_error`.
    pub async fn toggle_done(
        &self,
        id: &str,
        on_error: impl FnOnce(String),
        update_todo_on_screen: impl FnOnce(),
    ) {
        match self.gateway.toggle_done(id).await {
            Ok(_) => update_todo_on_screen(),
            Err(e) => {
                tracing::warn!(error = %e, id, "toggling todo failed");
                on_error(user_message(&e, DEFAULT_NETWORK_ERROR));
            }
        }
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ClientError> {
        self.gateway.delete_by_id(id).await
    }
}

/// Only messages the API wrote for humans are shown; anything else gets
/// `default`.
pub fn user_message(error: &ClientError, default: &str) -> String {
    match error {
        ClientError::Status { message, .. } if !message.is_empty() => message.clone(),
        _ => default.to_string(),
    }
}
