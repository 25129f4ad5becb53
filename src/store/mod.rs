//! Key-value persistence.
//!
//! The todo list is saved as whole JSON documents under fixed keys. Every
//! write replaces the previous value; there is no merging and no partial
//! update.

mod schema;
mod sqlite;

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

pub use sqlite::SqliteStorage;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored value under '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StorageError {
    pub fn corrupt(key: &str, reason: impl std::fmt::Display) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// A string-keyed store of JSON values.
pub trait Storage: Send + Sync {
    /// The value last written under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write `value` under `key`, replacing whatever was there.
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.lock().expect("storage lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}
