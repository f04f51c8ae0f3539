pub mod routes;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::repository::{page_range, GetParams, Todo};
use crate::routes::error::ApiError;

// MODELS

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, message = "content cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub todo: Todo,
}

// HELPER FUNCTIONS

impl ListQuery {
    /// Empty values count as absent. Pages whose rows cannot be addressed
    /// are rejected.
    pub fn parse(&self) -> Result<GetParams, ApiError> {
        let params = GetParams {
            page: parse_number("page", self.page.as_deref())?,
            limit: parse_number("limit", self.limit.as_deref())?,
        };

        let (page, limit) = params.resolve();
        if page_range(page, limit).is_none() {
            return Err(ApiError::bad_request("`page` and `limit` are out of range"));
        }

        Ok(params)
    }
}

fn parse_number(name: &str, value: Option<&str>) -> Result<Option<u32>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("`{}` must be a number", name))),
    }
}

pub fn parse_todo_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
