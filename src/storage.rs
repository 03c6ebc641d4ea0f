//! Persisted panel size
//!
//! A single integer size is stored per key in a shared, application-wide
//! key-value namespace. Keys are not scoped per panel instance: two panels
//! using the same key see each other's writes and the last writer wins.
//!
//! Storage failures never reach the caller. `SizeStore` logs them and keeps
//! serving values from an in-memory map for the rest of the session.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StorageError;

/// String key to string value store that survives restarts
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store, mostly for tests and the disabled-storage fallback
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store that refuses every operation (no config directory, storage disabled)
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }
}

/// JSON object on disk, cached in memory and written through on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; a corrupt
    /// one is logged and treated as empty so the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring corrupt storage file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

struct SizeStoreInner {
    backend: Box<dyn KeyValueStore>,
    /// Values written while the backend was failing
    fallback: HashMap<String, i64>,
}

/// Shared handle for reading and writing persisted sizes
///
/// Clones share the same backend, matching the application-wide namespace of
/// the underlying store.
#[derive(Clone)]
pub struct SizeStore {
    inner: Rc<RefCell<SizeStoreInner>>,
}

impl std::fmt::Debug for SizeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SizeStore")
            .field("fallback", &inner.fallback)
            .finish_non_exhaustive()
    }
}

impl SizeStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SizeStoreInner {
                backend: Box::new(backend),
                fallback: HashMap::new(),
            })),
        }
    }

    /// In-memory store with nothing persisted
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read the size for `key`, or `default` when it is absent or unparsable
    pub fn read(&self, key: &str, default: i64) -> i64 {
        let inner = self.inner.borrow();
        if let Some(&value) = inner.fallback.get(key) {
            return value;
        }
        match inner.backend.get(key) {
            Ok(Some(raw)) => parse_size(&raw).unwrap_or_else(|| {
                tracing::debug!("Unparsable size {:?} under {:?}, using default", raw, key);
                default
            }),
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Size read for {:?} failed, using default: {}", key, e);
                default
            }
        }
    }

    /// Persist `value` under `key`
    ///
    /// If the backend fails the value is kept in memory for this session.
    pub fn write(&self, key: &str, value: i64) {
        let mut inner = self.inner.borrow_mut();
        match inner.backend.set(key, &value.to_string()) {
            Ok(()) => {
                inner.fallback.remove(key);
            }
            Err(e) => {
                tracing::warn!("Size write for {:?} failed, keeping it in memory: {}", key, e);
                inner.fallback.insert(key.to_string(), value);
            }
        }
    }

    /// Forget the size for `key` so the next read yields the default
    pub fn reset(&self, key: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.fallback.remove(key);
        if let Err(e) = inner.backend.remove(key) {
            tracing::warn!("Size reset for {:?} failed: {}", key, e);
        }
    }
}

/// Stored values are JSON numbers; fractional values round to the nearest pixel
fn parse_size(raw: &str) -> Option<i64> {
    let value: f64 = serde_json::from_str(raw.trim()).ok()?;
    if value.is_finite() {
        Some(value.round() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let store = SizeStore::in_memory();
        store.write("k", 500);
        assert_eq!(store.read("k", 999), 500);
    }

    #[test]
    fn test_read_unknown_key_returns_default() {
        let store = SizeStore::in_memory();
        assert_eq!(store.read("unknown-key", 999), 999);
    }

    #[test]
    fn test_unparsable_value_returns_default() {
        let mut backend = MemoryStore::new();
        backend.set("k", "not a number").unwrap();
        let store = SizeStore::new(backend);
        assert_eq!(store.read("k", 42), 42);
    }

    #[test]
    fn test_fractional_value_rounds() {
        let mut backend = MemoryStore::new();
        backend.set("k", "120.6").unwrap();
        let store = SizeStore::new(backend);
        assert_eq!(store.read("k", 0), 121);
    }

    #[test]
    fn test_clones_share_namespace() {
        let a = SizeStore::in_memory();
        let b = a.clone();
        a.write("sidebar-width", 300);
        assert_eq!(b.read("sidebar-width", 0), 300);
        b.write("sidebar-width", 410);
        assert_eq!(a.read("sidebar-width", 0), 410);
    }

    #[test]
    fn test_disabled_backend_falls_back_to_memory() {
        let store = SizeStore::new(DisabledStore);
        assert_eq!(store.read("k", 350), 350);
        store.write("k", 200);
        assert_eq!(store.read("k", 350), 200);
        store.reset("k");
        assert_eq!(store.read("k", 350), 350);
    }

    #[test]
    fn test_reset_restores_default() {
        let store = SizeStore::in_memory();
        store.write("k", 10);
        store.reset("k");
        assert_eq!(store.read("k", 77), 77);
    }
}
