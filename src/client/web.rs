use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Form, Router,
};
use maud::Markup;
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use super::{
    api::TodoApi,
    render,
    view::{Filter, TodoView},
};

/// The single view controller shared by every browser request.
pub struct WebState<A> {
    view: Arc<RwLock<TodoView<A>>>,
}
impl<A> Clone for WebState<A> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
        }
    }
}
impl<A: TodoApi> WebState<A> {
    /// Builds the controller with an initial fetch; every page load fetches again.
    pub async fn load(api: A) -> Self {
        let mut view = TodoView::new(api);
        view.refresh().await;
        Self {
            view: Arc::new(RwLock::new(view)),
        }
    }
}

pub fn router<A: TodoApi + 'static>(state: WebState<A>) -> Router {
    Router::new()
        .route("/", get(index::<A>))
        .route("/add", post(add::<A>))
        .route("/toggle/:id", post(toggle::<A>))
        .route("/toggle-all", post(toggle_all::<A>))
        .route("/edit/:id", post(begin_edit::<A>))
        .route("/cancel-edit", post(cancel_edit::<A>))
        .route("/commit/:id", post(commit_edit::<A>))
        .route("/remove/:id", post(remove::<A>))
        .route("/clear-completed", post(clear_completed::<A>))
        .route("/filter/:filter", post(set_filter::<A>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[derive(Deserialize)]
struct NameForm {
    #[serde(default)]
    name: String,
}

// === Routes ===
// a full page load is a fresh mount and re-fetches the list
async fn index<A: TodoApi>(State(state): State<WebState<A>>) -> Markup {
    let mut view = state.view.write().await;
    view.refresh().await;
    render::page(&*view)
}

async fn add<A: TodoApi>(
    State(state): State<WebState<A>>,
    Form(NameForm { name }): Form<NameForm>,
) -> Markup {
    let mut view = state.view.write().await;
    view.set_input(name);
    view.add().await;
    render::app(&*view)
}

async fn toggle<A: TodoApi>(State(state): State<WebState<A>>, Path(id): Path<u64>) -> Markup {
    let mut view = state.view.write().await;
    view.toggle(id).await;
    render::app(&*view)
}

async fn toggle_all<A: TodoApi>(State(state): State<WebState<A>>) -> Markup {
    let mut view = state.view.write().await;
    view.toggle_all().await;
    render::app(&*view)
}

async fn begin_edit<A: TodoApi>(State(state): State<WebState<A>>, Path(id): Path<u64>) -> Markup {
    let mut view = state.view.write().await;
    view.begin_edit(id);
    render::app(&*view)
}

async fn cancel_edit<A: TodoApi>(State(state): State<WebState<A>>) -> Markup {
    let mut view = state.view.write().await;
    view.cancel_edit();
    render::app(&*view)
}

async fn commit_edit<A: TodoApi>(
    State(state): State<WebState<A>>,
    Path(id): Path<u64>,
    Form(NameForm { name }): Form<NameForm>,
) -> Markup {
    let mut view = state.view.write().await;
    // a stale editor form may target a row that is no longer being edited
    if view.editing() == Some(id) {
        view.commit_edit(&name).await;
    }
    render::app(&*view)
}

async fn remove<A: TodoApi>(State(state): State<WebState<A>>, Path(id): Path<u64>) -> Markup {
    let mut view = state.view.write().await;
    view.remove(id).await;
    render::app(&*view)
}

async fn clear_completed<A: TodoApi>(State(state): State<WebState<A>>) -> Markup {
    let mut view = state.view.write().await;
    view.clear_completed().await;
    render::app(&*view)
}

async fn set_filter<A: TodoApi>(
    State(state): State<WebState<A>>,
    Path(filter): Path<Filter>,
) -> Markup {
    let mut view = state.view.write().await;
    view.set_filter(filter);
    render::app(&*view)
}
