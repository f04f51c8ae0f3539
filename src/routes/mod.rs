use axum::{
    routing::{delete, get, put},
    Router,
};

pub mod error;
mod health;
pub mod todos;

pub use error::ApiError;
pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let todo_router = Router::new()
        .route("/", get(todos::routes::list).post(todos::routes::create))
        .route("/{id}", delete(todos::routes::delete))
        .route("/{id}/toggle-done", put(todos::routes::toggle_done));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/todos", todo_router)
}

async fn root() -> &'static str {
    "What do today? The todo API lives under /api/todos"
}
