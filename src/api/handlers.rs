use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::{
    error::{json_rejection, path_rejection, AppError},
    models::{
        BatchEnvelope, NewTodo, TodoEnvelope, TodoList, TodoPatch, ToggleAll,
    },
    repository::TodoRepository,
};

use super::AppState;

pub async fn root() -> &'static str {
    "Hello World!"
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, AppError> {
    let db = state.read().await;
    let todos = TodoRepository::new(&db).list()?;
    Ok(Json(TodoList { todos }))
}

pub async fn add_todo(
    State(state): State<AppState>,
    body: Result<Json<NewTodo>, JsonRejection>,
) -> Result<Json<TodoEnvelope>, AppError> {
    let Json(NewTodo { name }) = body.map_err(json_rejection)?;
    let db = state.write().await;
    let todo = TodoRepository::new(&db).create(name)?;
    tracing::debug!(id = todo.id, "created todo");
    Ok(Json(TodoEnvelope { todo }))
}

/// An empty body reads as `{}`.
pub async fn toggle_all(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchEnvelope>, AppError> {
    let ToggleAll { is_completed } = if body.is_empty() {
        ToggleAll::default()
    } else {
        Json::<ToggleAll>::from_bytes(&body).map_err(json_rejection)?.0
    };
    let db = state.write().await;
    let todos = TodoRepository::new(&db).set_all_completed(is_completed)?;
    Ok(Json(BatchEnvelope { todos }))
}

pub async fn clear_completed(
    State(state): State<AppState>,
) -> Result<Json<BatchEnvelope>, AppError> {
    let db = state.write().await;
    let todos = TodoRepository::new(&db).delete_completed()?;
    tracing::debug!(count = todos.count, "cleared completed todos");
    Ok(Json(BatchEnvelope { todos }))
}

pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<TodoEnvelope>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    let Json(patch) = body.map_err(json_rejection)?;
    let db = state.write().await;
    let todo = TodoRepository::new(&db).update(id, &patch)?;
    Ok(Json(TodoEnvelope { todo }))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<TodoEnvelope>, AppError> {
    let Path(id) = id.map_err(path_rejection)?;
    let db = state.write().await;
    let todo = TodoRepository::new(&db).delete(id)?;
    tracing::debug!(id, "deleted todo");
    Ok(Json(TodoEnvelope { todo }))
}
