//! Key-value storage backends.
//!
//! The pantry store persists its aggregate through this trait, so tests
//! run against an in-memory map while real use gets a sled database. The
//! trait moves raw bytes; encoding is the caller's concern.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A persistent mapping from string key to opaque value.
///
/// Single-process, no transactions. All methods are synchronous; `get` on
/// an absent key is `Ok(None)`, not an error.
pub trait KeyValueStore {
    /// Reads the value stored under a key.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Deletes a key and its value. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Sled-backed store for real use.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Opens or creates a store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key)?.map(|value| value.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key, value)?;
        self.db.flush()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.db.remove(key)?;
        self.db.flush()?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral pantries. Never fails.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
