//! Key-value storage seam.
//!
//! The ledger persists through a synchronous text key-value store. The quiz
//! core runs single-threaded and event-driven, so the seam is deliberately
//! synchronous; backends must fail fast rather than block or retry.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

/// Errors a storage backend can surface.
///
/// Callers above the [`crate::PerformanceStore`] never see these: the store
/// degrades to in-memory behavior on any backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused access (e.g. a sandboxed or read-only profile).
    #[error("storage access denied: {0}")]
    Denied(String),

    /// The backend ran out of room for the write.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// An underlying I/O failure.
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous text key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` if present. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory backend. Always available, never durable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Filesystem backend: one file per key under a base directory.
///
/// Keys are used verbatim as file names, so they must not contain path
/// separators. The ledger's namespaced keys satisfy this.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
