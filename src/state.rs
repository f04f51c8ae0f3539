use std::sync::Arc;

use crate::repository::TodoRepository;
use crate::store::TodoStore;

#[derive(Clone)]
pub struct AppState {
    pub todos: TodoRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            todos: TodoRepository::new(store),
        }
    }
}
