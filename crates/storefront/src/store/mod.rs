//! Persisted key-value store.
//!
//! Stands in for browser-local storage: string keys to string values, with
//! every write a full overwrite of its key. There are no transactions and no
//! retry semantics; callers treat reads as best-effort and log failures.
//!
//! # Keys
//!
//! - [`keys::USERS`] - JSON array of registered identities
//! - [`keys::CURRENT_USER`] - JSON session object, absent when logged out

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Store keys used by the storefront.
pub mod keys {
    /// Key for the registered identity list.
    pub const USERS: &str = "users";

    /// Key for the active session.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors that can occur reading or writing the persisted store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file exists but does not hold a JSON string map.
    #[error("store contents are not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A persisted string-to-string store.
///
/// The session manager's logic is written against this trait so tests can
/// inject [`MemoryStore`] instead of touching the filesystem.
pub trait KeyValueStore {
    /// Read the value for `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or parsed.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// File-backed store: one JSON object mapping keys to string values.
///
/// Reads of a missing file yield an empty store. Writes rewrite the whole
/// file; a malformed existing file is replaced rather than repaired, which
/// matches the last-write-wins contract of the key-value store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file.
    ///
    /// The file is created lazily on first write; its parent directory is
    /// created here.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A malformed file is overwritten, not repaired.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_map().unwrap_or_default();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value directly, bypassing the trait.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_owned(), value.to_owned());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.map.remove(key);
        Ok(())
    }
}

// A shared handle lets a test keep a view into a store owned by a service.
// Single-threaded by contract, so Rc/RefCell is enough.
impl KeyValueStore for std::rc::Rc<std::cell::RefCell<MemoryStore>> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.borrow_mut().remove(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.get(keys::USERS).unwrap().is_none());
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_dir, mut store) = temp_store();
        store.set("users", "[]").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites_key() {
        let (_dir, mut store) = temp_store();
        store.set("currentUser", "{\"a\":1}").unwrap();
        store.set("currentUser", "{\"b\":2}").unwrap();
        assert_eq!(
            store.get("currentUser").unwrap().as_deref(),
            Some("{\"b\":2}")
        );
    }

    #[test]
    fn test_set_preserves_other_keys() {
        let (_dir, mut store) = temp_store();
        store.set("users", "[]").unwrap();
        store.set("currentUser", "{}").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove() {
        let (_dir, mut store) = temp_store();
        store.set("users", "[]").unwrap();
        store.remove("users").unwrap();
        assert!(store.get("users").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let (_dir, mut store) = temp_store();
        store.remove("users").unwrap();
        assert!(store.get("users").unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_errors_on_read() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.get("users"), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_malformed_file_is_replaced_on_write() {
        let (_dir, mut store) = temp_store();
        fs::write(store.path(), "not json").unwrap();
        store.set("users", "[]").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store.set("users", "[]").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
        store.remove("users").unwrap();
        assert!(store.get("users").unwrap().is_none());
    }
}
