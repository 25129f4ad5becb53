//! The controller: turns user actions into model calls and persists the result.
//!
//! Every mutating call writes the whole list back to storage right after the
//! model changes, whether or not the targeted item existed.

use serde_json::Value;

use crate::models::{RestoreError, TodoId, TodoItem, TodoList};
use crate::store::{Result, Storage, StorageError};

/// Storage key holding the ordered array of items.
pub const ITEMS_KEY: &str = "todo-jquery";
/// Storage key holding the id counter.
pub const COUNTER_KEY: &str = "todo-id";

/// A todo list bound to the storage it is persisted in.
pub struct TodoApp<S: Storage> {
    list: TodoList,
    storage: S,
}

impl<S: Storage> TodoApp<S> {
    /// Load the list persisted in `storage`. Nothing stored means an empty list.
    pub fn init(storage: S) -> Result<Self> {
        let todos: Vec<TodoItem> = match storage.get(ITEMS_KEY)? {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => {
                serde_json::from_value(value).map_err(|e| StorageError::corrupt(ITEMS_KEY, e))?
            }
        };

        let counter = match storage.get(COUNTER_KEY)? {
            Some(Value::Null) | None => 0,
            Some(value) => value.as_u64().ok_or_else(|| {
                StorageError::corrupt(COUNTER_KEY, "expected a non-negative integer")
            })?,
        };

        let list = TodoList::restore(todos, counter).map_err(|e| match &e {
            RestoreError::DuplicateId(_) => StorageError::corrupt(ITEMS_KEY, &e),
            RestoreError::SequenceExhausted(_) => StorageError::corrupt(COUNTER_KEY, &e),
        })?;
        tracing::debug!("Loaded {} todos (counter at {})", list.len(), list.counter());

        Ok(Self { list, storage })
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    /// Add a new, not-done item.
    ///
    /// The title is trimmed. Blank input is ignored and nothing is written.
    pub fn add(&mut self, title: &str) -> Result<Option<TodoItem>> {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!("Ignoring blank todo title");
            return Ok(None);
        }

        let item = self.list.add(title, false).clone();
        tracing::debug!("Added {}", item.id());
        self.persist()?;
        Ok(Some(item))
    }

    /// Flip an item's done flag. Returns the new flag, or `None` for an unknown id.
    pub fn toggle(&mut self, id: &TodoId) -> Result<Option<bool>> {
        let done = self.list.toggle_done(id);
        tracing::debug!("Toggled {}: {:?}", id, done);
        self.persist()?;
        Ok(done)
    }

    /// Replace an item's title. Returns `false` for an unknown id.
    pub fn edit(&mut self, id: &TodoId, title: &str) -> Result<bool> {
        let found = self.list.set_title(id, title.trim());
        tracing::debug!("Edited {}: found={}", id, found);
        self.persist()?;
        Ok(found)
    }

    /// Delete one item. Returns it, or `None` for an unknown id.
    pub fn destroy(&mut self, id: &TodoId) -> Result<Option<TodoItem>> {
        let removed = self.list.remove(id);
        tracing::debug!("Removed {}: found={}", id, removed.is_some());
        self.persist()?;
        Ok(removed)
    }

    /// Delete every completed item. Returns how many went.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let removed = self.list.remove_all_done();
        tracing::debug!("Cleared {} completed todos", removed);
        self.persist()?;
        Ok(removed)
    }

    pub fn toggle_all(&mut self, done: bool) -> Result<()> {
        self.list.set_all_done(done);
        tracing::debug!("Marked all {} todos done={}", self.list.len(), done);
        self.persist()
    }

    /// Overwrite the stored state with the in-memory list.
    fn persist(&self) -> Result<()> {
        self.storage.set(COUNTER_KEY, Value::from(self.list.counter()))?;
        let items = serde_json::to_value(self.list.items())?;
        self.storage.set(ITEMS_KEY, items)?;
        Ok(())
    }
}
