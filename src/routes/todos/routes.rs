use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use super::{parse_todo_id, CreateTodoRequest, ListQuery, TodoResponse};
use crate::repository::RepositoryError;
use crate::routes::error::{issues_from, ApiError, Issue};
use crate::state::AppState;

const CREATE_MESSAGE: &str = "You need to provide a content to create a TODO";
const INVALID_ID_MESSAGE: &str = "You must provide a valid id";

fn invalid_id() -> ApiError {
    ApiError::bad_request(INVALID_ID_MESSAGE).with_issues(vec![Issue {
        path: "id".to_string(),
        code: "invalid_string".to_string(),
        message: "Invalid uuid".to_string(),
    }])
}

/// List one page of todos, newest first
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected list query");
        ApiError::bad_request("Invalid query string").with_issues(vec![Issue {
            path: "query".to_string(),
            code: "invalid_query".to_string(),
            message: "`page` and `limit` may each be given once".to_string(),
        }])
    })?;

    // invalid numbers stop here, the repository is never reached
    let params = query.parse()?;

    let page = state.todos.get(params).await.map_err(|e| match e {
        RepositoryError::OutOfRange { .. } => ApiError::bad_request(e.to_string()),
        e => ApiError::internal(e.to_string()),
    })?;

    Ok(Json(page))
}

/// Create a todo from `{content}`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        ApiError::bad_request(CREATE_MESSAGE).with_issues(vec![Issue {
            path: "content".to_string(),
            code: "invalid_type".to_string(),
            message: rejection.body_text(),
        }])
    })?;

    body.validate()
        .map_err(|e| ApiError::bad_request(CREATE_MESSAGE).with_issues(issues_from(&e)))?;

    let todo = state
        .todos
        .create_by_content(&body.content)
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(TodoResponse { todo })))
}

/// Flip a todo's `done` flag
pub async fn toggle_done(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::bad_request(INVALID_ID_MESSAGE))?;
    if id.trim().is_empty() {
        return Err(ApiError::bad_request(INVALID_ID_MESSAGE));
    }

    // an id that cannot be a uuid cannot match any row either
    let todo_id = parse_todo_id(&id)
        .ok_or_else(|| ApiError::not_found(RepositoryError::NotFound(id.clone()).to_string()))?;

    match state.todos.toggle_done(todo_id).await {
        Ok(todo) => Ok(Json(TodoResponse { todo })),
        Err(e @ RepositoryError::NotFound(_)) => Err(ApiError::not_found(e.to_string())),
        Err(e) => Err(ApiError::internal(e.to_string())),
    }
}

/// Hard-delete a todo
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|_| invalid_id())?;
    let todo_id = parse_todo_id(&id).ok_or_else(invalid_id)?;

    match state.todos.delete_by_id(todo_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e @ RepositoryError::NotFound(_)) => Err(ApiError::not_found(e.to_string())),
        Err(e) => Err(ApiError::internal(e.to_string())),
    }
}
