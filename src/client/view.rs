use std::fmt;

use serde::{Deserialize, Serialize};

use super::api::TodoApi;
use crate::models::{Todo, TodoPatch};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}
impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn shows(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.is_completed,
            Filter::Completed => todo.is_completed,
        }
    }
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Client-side todo state. Every command goes to the service and is then
/// followed by a full re-fetch; failures are logged and otherwise dropped.
pub struct TodoView<A> {
    api: A,
    todos: Vec<Todo>,
    filter: Filter,
    input: String,
    editing: Option<u64>,
    all_completed: bool,
}

impl<A: TodoApi> TodoView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            filter: Filter::default(),
            input: String::new(),
            editing: None,
            all_completed: false,
        }
    }

    // === Accessors ===
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }
    pub fn filter(&self) -> Filter {
        self.filter
    }
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn editing(&self) -> Option<u64> {
        self.editing
    }
    pub fn all_completed(&self) -> bool {
        self.all_completed
    }
    pub fn visible(&self) -> impl Iterator<Item = &Todo> + '_ {
        let filter = self.filter;
        self.todos.iter().filter(move |todo| filter.shows(todo))
    }
    /// Footer counter; counts the whole list, not just the active rows.
    pub fn item_count(&self) -> usize {
        self.todos.len()
    }

    // === Commands ===
    pub async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(todos) => {
                self.all_completed = todos.iter().all(|todo| todo.is_completed);
                self.todos = todos;
            }
            Err(err) => tracing::warn!(error = %err, "failed to fetch todos"),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub async fn add(&mut self) {
        if self.input.is_empty() {
            return;
        }
        if let Err(err) = self.api.add(&self.input).await {
            tracing::warn!(error = %err, "failed to add todo");
        }
        self.input.clear();
        self.refresh().await;
    }

    /// An id missing from the local list only triggers the refresh.
    pub async fn toggle(&mut self, id: u64) {
        let patch = self
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .map(|todo| TodoPatch {
                name: Some(todo.name.clone()),
                is_completed: Some(!todo.is_completed),
            });
        if let Some(patch) = patch {
            if let Err(err) = self.api.update(id, &patch).await {
                tracing::warn!(error = %err, id, "failed to toggle todo");
            }
        }
        self.refresh().await;
    }

    /// Flips the local flag before the request resolves; the refresh that
    /// follows makes the service's answer authoritative again.
    pub async fn toggle_all(&mut self) {
        let target = !self.all_completed;
        self.all_completed = target;
        if let Err(err) = self.api.toggle_all(target).await {
            tracing::warn!(error = %err, "failed to toggle all todos");
        }
        self.refresh().await;
    }

    pub fn begin_edit(&mut self, id: u64) {
        if self.todos.iter().any(|todo| todo.id == id) {
            self.editing = Some(id);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Empty names abort silently and leave edit mode on.
    pub async fn commit_edit(&mut self, name: &str) {
        let Some(id) = self.editing else {
            return;
        };
        if name.is_empty() {
            return;
        }
        let patch = TodoPatch {
            name: Some(name.to_string()),
            is_completed: self
                .todos
                .iter()
                .find(|todo| todo.id == id)
                .map(|todo| todo.is_completed),
        };
        if let Err(err) = self.api.update(id, &patch).await {
            tracing::warn!(error = %err, id, "failed to rename todo");
        }
        self.editing = None;
        self.refresh().await;
    }

    pub async fn remove(&mut self, id: u64) {
        if let Err(err) = self.api.delete(id).await {
            tracing::warn!(error = %err, id, "failed to delete todo");
        }
        self.refresh().await;
    }

    pub async fn clear_completed(&mut self) {
        if let Err(err) = self.api.clear_completed().await {
            tracing::warn!(error = %err, "failed to clear completed todos");
        }
        self.refresh().await;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }
}
