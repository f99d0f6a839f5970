use anyhow::{anyhow, Result};

use crate::{
    db::Db,
    models::{BatchSummary, Todo, TodoPatch},
};

const TODO_PREFIX: &[u8] = b"todo:";

/// Big-endian ids keep prefix scans in ascending id order.
fn todo_key(id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(TODO_PREFIX.len() + 8);
    key.extend_from_slice(TODO_PREFIX);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Todo persistence; each method is a single storage call.
pub struct TodoRepository<'a> {
    db: &'a Db,
}
impl<'a> TodoRepository<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn list(&self) -> Result<Vec<Todo>> {
        self.db
            .scan_prefix::<Todo>(TODO_PREFIX)
            .map(|item| item.map(|(_, todo)| todo))
            .collect()
    }

    pub fn create(&self, name: String) -> Result<Todo> {
        let id = self.db.next_id()?;
        let todo = Todo::new(id, name);
        self.db.insert(todo_key(id), &todo)?;
        Ok(todo)
    }

    pub fn update(&self, id: u64, patch: &TodoPatch) -> Result<Todo> {
        let key = todo_key(id);
        let mut todo = self
            .db
            .get::<Todo, _>(&key)?
            .ok_or_else(|| anyhow!("Record to update not found."))?;
        patch.apply(&mut todo);
        self.db.insert(&key, &todo)?;
        Ok(todo)
    }

    pub fn delete(&self, id: u64) -> Result<Todo> {
        self.db
            .remove::<Todo, _>(todo_key(id))?
            .ok_or_else(|| anyhow!("Record to delete does not exist."))
    }

    /// Sets the completion flag on every row. `None` touches nothing but
    /// still reports how many rows matched.
    pub fn set_all_completed(&self, is_completed: Option<bool>) -> Result<BatchSummary> {
        let mut batch = self.db.batch();
        let mut count = 0;
        for item in self.db.scan_prefix::<Todo>(TODO_PREFIX) {
            let (key, mut todo) = item?;
            count += 1;
            if let Some(is_completed) = is_completed {
                todo.is_completed = is_completed;
                batch.insert(key, &todo)?;
            }
        }
        self.db.apply(batch)?;
        Ok(BatchSummary { count })
    }

    pub fn delete_completed(&self) -> Result<BatchSummary> {
        let mut batch = self.db.batch();
        for item in self.db.scan_prefix::<Todo>(TODO_PREFIX) {
            let (key, todo) = item?;
            if todo.is_completed {
                batch.remove(key);
            }
        }
        let count = batch.len();
        self.db.apply(batch)?;
        Ok(BatchSummary { count })
    }
}
