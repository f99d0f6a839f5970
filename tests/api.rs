use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use htmx_todos::{
    api::{self, AppState},
    models::{BatchEnvelope, ErrorBody, Todo, TodoEnvelope, TodoList},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Result<Router> {
    Ok(api::router(AppState::temporary()?))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Vec<u8>)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let body = match body {
        Some(body) => Body::from(serde_json::to_vec(&body)?),
        None => Body::empty(),
    };
    let response = app.clone().oneshot(request.body(body)?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn call_ok<T: DeserializeOwned>(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<T> {
    let (status, bytes) = call(app, method, uri, body).await?;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
    Ok(serde_json::from_slice(&bytes)?)
}

async fn call_err(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<String> {
    let (status, bytes) = call(app, method, uri, body).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let ErrorBody { message } = serde_json::from_slice(&bytes)?;
    Ok(message)
}

async fn add(app: &Router, name: &str) -> Result<Todo> {
    let TodoEnvelope { todo } =
        call_ok(app, Method::POST, "/add-todo", Some(json!({ "name": name }))).await?;
    Ok(todo)
}

async fn list(app: &Router) -> Result<Vec<Todo>> {
    let TodoList { todos } = call_ok(app, Method::GET, "/todos", None).await?;
    Ok(todos)
}

#[tokio::test]
async fn test_root() -> Result<()> {
    let app = app()?;
    let (status, body) = call(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Hello World!");
    Ok(())
}

#[tokio::test]
async fn test_add_defaults_incomplete() -> Result<()> {
    let app = app()?;
    assert!(list(&app).await?.is_empty());
    let todo = add(&app, "a").await?;
    assert_eq!(todo.name, "a");
    assert!(!todo.is_completed);
    assert_eq!(list(&app).await?, vec![todo]);
    Ok(())
}

#[tokio::test]
async fn test_add_without_name_is_500() -> Result<()> {
    let app = app()?;
    let message = call_err(&app, Method::POST, "/add-todo", Some(json!({}))).await?;
    assert!(message.contains("name"), "{}", message);
    assert!(list(&app).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_update_and_order() -> Result<()> {
    let app = app()?;
    let a = add(&app, "a").await?;
    let b = add(&app, "b").await?;
    let TodoEnvelope { todo } = call_ok(
        &app,
        Method::PATCH,
        &format!("/update-todo/{}", a.id),
        Some(json!({ "id": a.id, "name": "a2", "is_completed": true })),
    )
    .await?;
    assert_eq!(todo.name, "a2");
    assert!(todo.is_completed);

    let todos = list(&app).await?;
    assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a.id, b.id]);
    assert_eq!(todos[1], b);
    Ok(())
}

#[tokio::test]
async fn test_missing_ids_are_500() -> Result<()> {
    let app = app()?;
    let message = call_err(
        &app,
        Method::PATCH,
        "/update-todo/99",
        Some(json!({ "name": "x" })),
    )
    .await?;
    assert_eq!(message, "Record to update not found.");
    let message = call_err(&app, Method::DELETE, "/delete-todo/99", None).await?;
    assert_eq!(message, "Record to delete does not exist.");
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_id_is_500() -> Result<()> {
    let app = app()?;
    call_err(&app, Method::DELETE, "/delete-todo/abc", None).await?;
    Ok(())
}

#[tokio::test]
async fn test_delete_removes_exactly_one() -> Result<()> {
    let app = app()?;
    let a = add(&app, "a").await?;
    let b = add(&app, "b").await?;
    let TodoEnvelope { todo } =
        call_ok(&app, Method::DELETE, &format!("/delete-todo/{}", a.id), None).await?;
    assert_eq!(todo, a);
    assert_eq!(list(&app).await?, vec![b]);
    call_err(&app, Method::DELETE, &format!("/delete-todo/{}", a.id), None).await?;
    Ok(())
}

#[tokio::test]
async fn test_toggle_all_and_clear_completed() -> Result<()> {
    let app = app()?;
    add(&app, "a").await?;
    add(&app, "b").await?;
    let BatchEnvelope { todos } = call_ok(
        &app,
        Method::POST,
        "/toggle-all",
        Some(json!({ "is_completed": true })),
    )
    .await?;
    assert_eq!(todos.count, 2);
    assert!(list(&app).await?.iter().all(|t| t.is_completed));

    let c = add(&app, "c").await?;
    let BatchEnvelope { todos } = call_ok(&app, Method::POST, "/clear-completed", None).await?;
    assert_eq!(todos.count, 2);
    assert_eq!(list(&app).await?, vec![c]);
    Ok(())
}

#[tokio::test]
async fn test_toggle_all_without_body_counts_rows() -> Result<()> {
    let app = app()?;
    let a = add(&app, "a").await?;
    let BatchEnvelope { todos } = call_ok(&app, Method::POST, "/toggle-all", None).await?;
    assert_eq!(todos.count, 1);
    assert_eq!(list(&app).await?, vec![a]);

    let message = call_err(&app, Method::POST, "/toggle-all", Some(json!([1, 2]))).await?;
    assert!(!message.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cors_preflight() -> Result<()> {
    let app = app()?;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/update-todo/1")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.as_bytes()),
        Some(&b"*"[..])
    );
    Ok(())
}
