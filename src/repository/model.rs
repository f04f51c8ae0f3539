use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::store::TodoRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Todo {
    pub id: Uuid,
    #[validate(length(min = 1, message = "content cannot be empty"))]
    pub content: String,
    pub done: bool,
    pub date: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = validator::ValidationErrors;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let todo = Todo {
            id: row.id,
            content: row.content,
            done: row.done,
            date: row.date,
        };
        todo.validate()?;
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(content: &str) -> TodoRow {
        TodoRow {
            id: Uuid::new_v4(),
            content: content.to_string(),
            done: false,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_row_with_content_converts() {
        let todo = Todo::try_from(row("Run 5k")).unwrap();
        assert_eq!(todo.content, "Run 5k");
        assert!(!todo.done);
    }

    #[test]
    fn test_row_without_content_is_rejected() {
        let err = Todo::try_from(row("")).unwrap_err();
        assert!(err.field_errors().contains_key("content"));
    }
}
