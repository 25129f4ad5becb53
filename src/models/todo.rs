use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ID_PREFIX: &str = "todo-id-";

/// Highest counter value [`TodoList::restore`] accepts. Keeps `add` clear of overflow.
pub const MAX_SEQUENCE: u64 = u64::MAX / 2;

/// Identifier of a todo item.
///
/// Ids minted by [`TodoList::add`] are sequential (`todo-id-1`, `todo-id-2`, ...).
/// Ids loaded from storage are kept verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    fn sequential(n: u64) -> Self {
        Self(format!("{ID_PREFIX}{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The counter value this id was minted from, if it follows the sequential scheme.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(ID_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single task.
///
/// Fields are read-only from outside the crate; changes go through [`TodoList`]
/// so the id invariants cannot be broken by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    title: String,
    id: TodoId,
    #[serde(default)]
    done: bool,
}

impl TodoItem {
    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Why persisted items could not be turned back into a [`TodoList`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("duplicate id {0}")]
    DuplicateId(TodoId),

    #[error("id sequence {0} is beyond the supported maximum")]
    SequenceExhausted(u64),
}

/// The ordered list of todo items.
///
/// Items stay in insertion order. Ids are unique and never change once minted.
/// Lookups by an unknown id are never an error: mutations report the miss
/// through their return value and leave the list untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    todos: Vec<TodoItem>,
    /// Last sequence number handed out.
    counter: u64,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a list from persisted items and the persisted counter.
    ///
    /// The counter is raised to the highest sequence found among `todos`, so a
    /// missing or stale counter never mints an id that is already taken.
    /// Duplicate ids and counters above [`MAX_SEQUENCE`] are rejected.
    pub fn restore(todos: Vec<TodoItem>, counter: u64) -> Result<Self, RestoreError> {
        let mut seen = HashSet::with_capacity(todos.len());
        for todo in &todos {
            if !seen.insert(&todo.id) {
                return Err(RestoreError::DuplicateId(todo.id.clone()));
            }
        }

        let highest = todos
            .iter()
            .filter_map(|t| t.id.sequence())
            .max()
            .unwrap_or(0);
        let counter = counter.max(highest);
        if counter > MAX_SEQUENCE {
            return Err(RestoreError::SequenceExhausted(counter));
        }

        Ok(Self { todos, counter })
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.todos.iter()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Append a new item with a freshly minted id.
    ///
    /// The title is taken as given. Rejecting blank input is the caller's job.
    pub fn add(&mut self, title: impl Into<String>, done: bool) -> &TodoItem {
        self.counter += 1;
        self.todos.push(TodoItem {
            title: title.into(),
            id: TodoId::sequential(self.counter),
            done,
        });
        &self.todos[self.todos.len() - 1]
    }

    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TodoId) -> Option<&mut TodoItem> {
        self.todos.iter_mut().find(|t| &t.id == id)
    }

    /// Flip the done flag. Returns the new value, or `None` if no item has `id`.
    pub fn toggle_done(&mut self, id: &TodoId) -> Option<bool> {
        let todo = self.get_mut(id)?;
        todo.done = !todo.done;
        Some(todo.done)
    }

    /// Replace the title in place. Returns `false` if no item has `id`.
    pub fn set_title(&mut self, id: &TodoId, title: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(todo) => {
                todo.title = title.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &TodoId) -> Option<TodoItem> {
        let index = self.todos.iter().position(|t| &t.id == id)?;
        Some(self.todos.remove(index))
    }

    /// Drop every completed item, keeping the others in order. Returns how many were removed.
    pub fn remove_all_done(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| !t.done);
        before - self.todos.len()
    }

    pub fn set_all_done(&mut self, done: bool) {
        for todo in &mut self.todos {
            todo.done = done;
        }
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.done).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.active_count()
    }

    /// True when the list is non-empty and every item is done.
    pub fn all_done(&self) -> bool {
        !self.todos.is_empty() && self.active_count() == 0
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.todos.iter()
    }
}
