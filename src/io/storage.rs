use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::lock::{DEFAULT_LOCK_TIMEOUT, LockError, WriteLock};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};

/// Error type for key-value storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A flat string key-value store.
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if nothing was ever written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any prior value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Directory where unreadable or unsaved values get copied, if any.
    fn recovery_dir(&self) -> Option<&Path> {
        None
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// File that backs `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadError { path, source: e }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let result = fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::WriteError {
                path: self.dir.clone(),
                source: e,
            })
            .and_then(|()| {
                let _lock = WriteLock::acquire(&self.dir, DEFAULT_LOCK_TIMEOUT)?;
                recovery::atomic_write(&path, value.as_bytes()).map_err(|e| {
                    StorageError::WriteError {
                        path: path.clone(),
                        source: e,
                    }
                })
            });

        if let Err(e) = &result {
            recovery::log_recovery(
                &self.dir,
                RecoveryEntry::new(RecoveryCategory::Write, format!("{} write failed", key))
                    .field("Target", path.display().to_string())
                    .field("Error", e.to_string())
                    .body(value),
            );
        }
        result
    }

    fn recovery_dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}

/// In-memory store with switchable failures, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed `key` with `value`
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("reads disabled".into()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_missing_key_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join(".jot"));
        assert!(store.get_item("tasks").unwrap().is_none());
    }

    #[test]
    fn file_store_set_creates_dir_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join(".jot"));
        store.set_item("tasks", "[1]").unwrap();
        store.set_item("tasks", "[2]").unwrap();
        assert_eq!(store.get_item("tasks").unwrap().as_deref(), Some("[2]"));
        assert!(store.path_for("tasks").ends_with(".jot/tasks.json"));
        // Lock file stays behind so later writers share one inode
        assert!(tmp.path().join(".jot/.lock").exists());
    }

    #[test]
    fn file_store_read_error_on_directory() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        fs::create_dir_all(store.path_for("tasks")).unwrap();
        assert!(matches!(
            store.get_item("tasks"),
            Err(StorageError::ReadError { .. })
        ));
    }

    #[test]
    fn file_store_failed_write_goes_to_recovery_log() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path());
        // A directory where the file should be makes the rename fail
        fs::create_dir_all(store.path_for("tasks").join("occupied")).unwrap();
        let err = store.set_item("tasks", "[{\"id\":1}]");
        assert!(err.is_err());

        let log = fs::read_to_string(recovery::recovery_log_path(tmp.path())).unwrap();
        assert!(log.contains("tasks write failed"));
        assert!(log.contains("[{\"id\":1}]"));
    }

    #[test]
    fn memory_store_failures() {
        let mut store = MemoryStore::new().with_item("tasks", "[]");
        assert_eq!(store.get_item("tasks").unwrap().as_deref(), Some("[]"));
        store.fail_writes = true;
        assert!(store.set_item("tasks", "[1]").is_err());
        assert_eq!(store.get_item("tasks").unwrap().as_deref(), Some("[]"));
        store.fail_reads = true;
        assert!(store.get_item("tasks").is_err());
    }
}
