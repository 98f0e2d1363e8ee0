//! Client-local key/value storage
//!
//! The theme store talks to storage through [`ThemeStorage`] so hosts can
//! plug in whatever they have (browser local storage, a file, memory).

use crate::error::StorageError;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Best-effort string storage keyed by name
pub trait ThemeStorage: Send + Sync {
    /// Read a key. `Ok(None)` means the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a key, replacing any previous value
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: ThemeStorage + ?Sized> ThemeStorage for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<T: ThemeStorage + ?Sized> ThemeStorage for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// In-memory storage with switchable failure modes.
///
/// Share it through an `Arc` to model a page reload: a second store created
/// over the same storage sees what the first one persisted.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    /// Maximum total bytes of keys + values
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects every read and write
    pub fn disabled() -> Self {
        let storage = Self::default();
        storage.set_fail_reads(true);
        storage.set_fail_writes(true);
        storage
    }

    /// Storage with a byte quota over all keys and values
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed or overwrite a value directly, bypassing failure modes
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    /// Inspect a value directly, bypassing failure modes
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ThemeStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("reads disabled".into()));
        }
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }

        let mut entries = self.lock();
        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let bytes = key.len() + value.len();
            if others + bytes > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a TOML table of string values on disk.
///
/// A missing file reads as empty. A corrupt file reads as an error and is
/// replaced on the next successful write.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        toml::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }
}

impl ThemeStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %reason,
                    "replacing corrupt storage file"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = toml::to_string(&entries).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip_and_failures() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("theme").unwrap(), None);
        storage.write("theme", "kawaii").unwrap();
        assert_eq!(storage.read("theme").unwrap().as_deref(), Some("kawaii"));

        storage.set_fail_reads(true);
        assert!(matches!(
            storage.read("theme"),
            Err(StorageError::Unavailable(_))
        ));
        // Direct inspection bypasses the failure switch
        assert_eq!(storage.get("theme").as_deref(), Some("kawaii"));
    }

    #[test]
    fn test_quota() {
        let storage = MemoryStorage::with_quota(12);
        storage.write("theme", "kawaii").unwrap(); // 11 bytes
        assert!(matches!(
            storage.write("theme", "portfolio"), // 14 bytes
            Err(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(storage.get("theme").as_deref(), Some("kawaii"));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.toml");
        let storage = FileStorage::new(&path);

        assert_eq!(storage.read("theme").unwrap(), None);
        storage.write("theme", "kawaii").unwrap();
        storage.write("other", "value").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.read("theme").unwrap().as_deref(), Some("kawaii"));
        assert_eq!(reopened.read("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_storage_corrupt_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.read("theme"), Err(StorageError::Corrupt(_))));

        storage.write("theme", "portfolio").unwrap();
        assert_eq!(storage.read("theme").unwrap().as_deref(), Some("portfolio"));
    }
}
