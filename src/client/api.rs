use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{
    BatchEnvelope, BatchSummary, ErrorBody, NewTodo, Todo, TodoEnvelope, TodoList, TodoPatch,
    ToggleAll,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Service { status: StatusCode, message: String },
}

/// One call per service route.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;
    async fn add(&self, name: &str) -> Result<Todo, ClientError>;
    async fn toggle_all(&self, is_completed: bool) -> Result<BatchSummary, ClientError>;
    async fn clear_completed(&self) -> Result<BatchSummary, ClientError>;
    async fn update(&self, id: u64, patch: &TodoPatch) -> Result<Todo, ClientError>;
    async fn delete(&self, id: u64) -> Result<Todo, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}
impl HttpTodoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            return Err(ClientError::Service { status, message });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let TodoList { todos } = Self::send(self.request(Method::GET, "/todos")).await?;
        Ok(todos)
    }

    async fn add(&self, name: &str) -> Result<Todo, ClientError> {
        let body = NewTodo {
            name: name.to_string(),
        };
        let TodoEnvelope { todo } =
            Self::send(self.request(Method::POST, "/add-todo").json(&body)).await?;
        Ok(todo)
    }

    async fn toggle_all(&self, is_completed: bool) -> Result<BatchSummary, ClientError> {
        let body = ToggleAll {
            is_completed: Some(is_completed),
        };
        let BatchEnvelope { todos } =
            Self::send(self.request(Method::POST, "/toggle-all").json(&body)).await?;
        Ok(todos)
    }

    async fn clear_completed(&self) -> Result<BatchSummary, ClientError> {
        let BatchEnvelope { todos } =
            Self::send(self.request(Method::POST, "/clear-completed")).await?;
        Ok(todos)
    }

    async fn update(&self, id: u64, patch: &TodoPatch) -> Result<Todo, ClientError> {
        let endpoint = format!("/update-todo/{}", id);
        let TodoEnvelope { todo } =
            Self::send(self.request(Method::PATCH, &endpoint).json(patch)).await?;
        Ok(todo)
    }

    async fn delete(&self, id: u64) -> Result<Todo, ClientError> {
        let endpoint = format!("/delete-todo/{}", id);
        let TodoEnvelope { todo } = Self::send(self.request(Method::DELETE, &endpoint)).await?;
        Ok(todo)
    }
}
