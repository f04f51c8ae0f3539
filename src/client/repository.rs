use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde_json::{json, Value};

use super::{ClientError, Todo, TodoGateway, TodoPage};

#[derive(Debug, Clone)]
pub struct HttpTodoClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTodoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// `<base>/api/todos/<segments...>`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "todos"])
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl TodoGateway for HttpTodoClient {
    async fn get(&self, page: u32, limit: u32) -> Result<TodoPage, ClientError> {
        let mut url = self.url(&[])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let response = self.http.get(url).send().await?;

        let text = response.text().await?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);

        Ok(parse_todos_from_server(&body))
    }

    async fn create(&self, content: &str) -> Result<Todo, ClientError> {
        let response = self
            .http
            .post(self.url(&[])?)
            .json(&json!({ "content": content }))
            .send()
            .await?;

        read_todo(response).await
    }

    async fn toggle_done(&self, id: &str) -> Result<Todo, ClientError> {
        let response = self
            .http
            .put(self.url(&[id, "toggle-done"])?)
            .send()
            .await?;

        read_todo(response).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.url(&[id])?).send().await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(status_error(response).await)
    }
}

async fn read_todo(response: Response) -> Result<Todo, ClientError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| ClientError::Malformed(e.to_string()))?;

    parse_todo(&body["todo"]).ok_or_else(|| ClientError::Malformed("missing `todo`".to_string()))
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    }
}

/// The `error.message` of an API error body, or the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

/// Reads a list body. Anything that is not a well-formed
/// `{total, pages, todos: [...]}` becomes an empty page.
pub fn parse_todos_from_server(body: &Value) -> TodoPage {
    let (Some(total), Some(pages), Some(todos)) = (
        body.get("total"),
        body.get("pages"),
        body.get("todos").and_then(Value::as_array),
    ) else {
        return TodoPage::default();
    };

    match todos.iter().map(parse_todo).collect::<Option<Vec<_>>>() {
        Some(todos) => TodoPage {
            todos,
            total: as_count(total),
            pages: as_count(pages),
        },
        None => TodoPage::default(),
    }
}

fn parse_todo(value: &Value) -> Option<Todo> {
    let todo = value.as_object()?;

    let done = match todo.get("done") {
        Some(Value::Bool(done)) => *done,
        Some(Value::String(done)) => done.eq_ignore_ascii_case("true"),
        _ => false,
    };

    Some(Todo {
        id: todo.get("id")?.as_str()?.to_string(),
        content: todo.get("content")?.as_str()?.to_string(),
        done,
        date: todo
            .get("date")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn as_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::AppState;
    use crate::store::MemoryTodoStore;

    async fn serve() -> HttpTodoClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = crate::app(AppState::new(Arc::new(MemoryTodoStore::new())));
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        HttpTodoClient::new(format!("http://{}/", addr))
    }

    #[test]
    fn test_parse_well_formed_body() {
        let body = json!({
            "total": 2,
            "pages": "1",
            "todos": [
                { "id": "a", "content": "Run 5k", "done": true, "date": "2023-12-09T20:27:53.710Z" },
                { "id": "b", "content": "Study", "done": "TRUE" },
            ]
        });

        let page = parse_todos_from_server(&body);
        assert_eq!(page.total, 2);
        assert_eq!(page.pages, 1);
        assert_eq!(page.todos.len(), 2);
        assert!(page.todos[0].done);
        assert!(page.todos[1].done);
        assert_eq!(page.todos[1].date, "");
    }

    #[test]
    fn test_parse_malformed_bodies_are_empty() {
        for body in [
            Value::Null,
            json!("oops"),
            json!({ "todos": [] }),
            json!({ "total": 1, "pages": 1, "todos": "nope" }),
            json!({ "total": 1, "pages": 1, "todos": [null] }),
            json!({ "total": 1, "pages": 1, "todos": [{ "content": "no id" }] }),
        ] {
            assert_eq!(parse_todos_from_server(&body), TodoPage::default());
        }
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        let body = r#"{"error":{"message":"`page` must be a number"}}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "`page` must be a number");
        assert_eq!(error_message(StatusCode::NOT_FOUND, "<html>"), "Not Found");
    }

    #[tokio::test]
    async fn test_round_trip_against_server() {
        let client = serve().await;

        let created = client.create("Test TODO").await.unwrap();
        assert_eq!(created.content, "Test TODO");
        assert!(!created.done);

        let page = client.get(1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.todos[0].id, created.id);

        let toggled = client.toggle_done(&created.id).await.unwrap();
        assert!(toggled.done);

        client.delete_by_id(&created.id).await.unwrap();
        assert!(client.get(1, 10).await.unwrap().todos.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_statuses_raise() {
        let client = serve().await;

        match client.create("").await {
            Err(ClientError::Status { status, .. }) => assert_eq!(status, 400),
            other => panic!("expected status error, got {:?}", other),
        }

        match client.delete_by_id("250aaa1b-5ad6-4a07-9601-156506bc59a3").await {
            Err(ClientError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_escapes_id_segments() {
        let client = HttpTodoClient::new("http://localhost:3000/");

        let url = client.url(&["a/b?c#d", "toggle-done"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/todos/a%2Fb%3Fc%23d/toggle-done");

        assert!(matches!(
            HttpTodoClient::new("not a url").url(&[]),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_ids_with_reserved_characters_stay_in_their_route() {
        let client = serve().await;

        match client.toggle_done("a/b?c#d").await {
            Err(ClientError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert!(message.contains("a/b?c#d"));
            }
            other => panic!("expected status error, got {:?}", other),
        }

        match client.delete_by_id("a/b").await {
            Err(ClientError::Status { status, .. }) => assert_eq!(status, 400),
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
