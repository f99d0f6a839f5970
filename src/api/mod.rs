pub mod handlers;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::Db;

// === App State ===
#[derive(Debug, Clone)]
pub struct AppState {
    state: Arc<RwLock<Db>>,
}
impl AppState {
    pub fn new(db: Db) -> Self {
        Self {
            state: Arc::new(RwLock::new(db)),
        }
    }
    pub fn temporary() -> Result<Self> {
        Ok(Self::new(Db::temporary()?))
    }

    // borrow immutable state
    pub async fn read(&self) -> RwLockReadGuard<'_, Db> {
        self.state.read().await
    }
    // borrow mutable state
    pub async fn write(&self) -> RwLockWriteGuard<'_, Db> {
        self.state.write().await
    }
}

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/todos", get(handlers::list_todos))
        .route("/add-todo", post(handlers::add_todo))
        .route("/toggle-all", post(handlers::toggle_all))
        .route("/clear-completed", post(handlers::clear_completed))
        .route("/update-todo/:id", patch(handlers::update_todo))
        .route("/delete-todo/:id", delete(handlers::delete_todo))
        .with_state(state)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}
