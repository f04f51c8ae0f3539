use std::sync::Arc;

use todo_feed::client::{filter_todos_by_content, HttpTodoClient, TodoController};
use todo_feed::state::AppState;
use todo_feed::store::MemoryTodoStore;

async fn controller() -> TodoController<HttpTodoClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = todo_feed::app(AppState::new(Arc::new(MemoryTodoStore::new())));
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    TodoController::new(HttpTodoClient::new(format!("http://{}", addr)))
}

#[tokio::test]
async fn new_todo_shows_up_first_in_the_feed() {
    let controller = controller().await;

    let mut older = None;
    controller
        .create("Run 5k", |t| older = Some(t), |m| panic!("create failed: {m}"))
        .await;

    let mut created = None;
    controller
        .create("Test TODO", |t| created = Some(t), |m| panic!("create failed: {m}"))
        .await;
    let created = created.unwrap();
    assert_eq!(created.content, "Test TODO");
    assert!(!created.done);
    assert_ne!(Some(&created.id), older.as_ref().map(|t| &t.id));

    let feed = controller.get(1).await.unwrap();
    assert_eq!(feed.total, 2);
    assert_eq!(feed.pages, 1);
    assert_eq!(feed.todos[0].id, created.id);
    assert_eq!(feed.todos[1].content, "Run 5k");

    let found = filter_todos_by_content("run", &feed.todos);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].content, "Run 5k");
}

#[tokio::test]
async fn toggle_and_delete_through_the_controller() {
    let controller = controller().await;

    let mut created = None;
    controller
        .create("Study", |t| created = Some(t), |m| panic!("create failed: {m}"))
        .await;
    let id = created.unwrap().id;

    let mut flipped = false;
    controller
        .toggle_done(&id, |m| panic!("toggle failed: {m}"), || flipped = true)
        .await;
    assert!(flipped);
    assert!(controller.get(1).await.unwrap().todos[0].done);

    controller.delete_by_id(&id).await.unwrap();
    assert!(controller.get(1).await.unwrap().todos.is_empty());

    let mut error = None;
    controller
        .toggle_done(&id, |m| error = Some(m), || panic!("toggled a deleted todo"))
        .await;
    assert!(error.unwrap().contains("not found"));
    assert!(controller.delete_by_id(&id).await.is_err());
}
