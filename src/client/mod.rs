pub mod api;
pub mod render;
pub mod view;
pub mod web;

pub use api::{ClientError, HttpTodoApi, TodoApi};
pub use view::{Filter, TodoView};
