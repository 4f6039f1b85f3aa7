//! # Key/Value Storage Backends
//!
//! The evaluation engine only needs a flat string store with get/set/remove,
//! the same contract a browser's local storage offers. This module defines
//! that contract as [`KeyValueStore`] and provides two backends.
//!
//! | Backend | Persistence | Sharing |
//! |---------|-------------|---------|
//! | [`SledStore`] | Sled database on disk (or temporary) | clones share the database |
//! | [`MemoryStore`] | process memory only | clones share the map |
//!
//! ## Storage Structure
//!
//! [`SledStore`] keeps every entry in a single tree:
//!
//! | Tree | Key | Value |
//! |------|-----|-------|
//! | `local_storage` | UTF-8 key | UTF-8 JSON blob |
//!
//! ## References
//!
//! - Sled documentation: <https://sled.rs/>

use crate::error::{Result, StoreError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

/// Tree name holding all key/value entries.
const STORAGE_TREE: &str = "local_storage";

/// A flat string key/value store.
pub trait KeyValueStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Lists every stored key in lexicographic order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Sled-backed store.
///
/// # Example
///
/// ```rust
/// use review_store::{KeyValueStore, SledStore};
///
/// let mut store = SledStore::temporary().unwrap();
/// store.set("greeting", "hello").unwrap();
/// assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
/// ```
#[derive(Clone)]
pub struct SledStore {
    /// The underlying Sled database.
    db: sled::Db,

    /// Tree holding the entries.
    entries: sled::Tree,
}

impl SledStore {
    /// Opens or creates a database at the given path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the path is invalid, permissions are
    /// insufficient or the database is corrupted.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        let entries = db.open_tree(STORAGE_TREE)?;

        Ok(SledStore { db, entries })
    }

    /// Creates a temporary database that is discarded on drop.
    pub fn temporary() -> Result<Self> {
        let config = sled::Config::new().temporary(true);
        let db = config.open()?;
        let entries = db.open_tree(STORAGE_TREE)?;

        Ok(SledStore { db, entries })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flushes all pending writes to disk, returning the bytes flushed.
    pub fn flush(&self) -> Result<usize> {
        Ok(self.db.flush()?)
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entries.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| StoreError::Encoding(key.to_string())),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key.as_bytes())?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for result in self.entries.iter() {
            let (key, _) = result?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|_| StoreError::Encoding(String::from_utf8_lossy(&key).into_owned()))?;
            keys.push(key);
        }

        Ok(keys)
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("entries", &self.len())
            .finish()
    }
}

/// In-memory store. Clones share one map, so several sessions in the same
/// thread see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}
