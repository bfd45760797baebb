//! Durable key/value storage that survives restarts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Local-storage style string store.
///
/// Reads of missing keys return `None`; nothing here expires on its own.
pub trait DurableStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Process-local store, mostly for tests and one-shot tools.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.lock().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.lock().remove(key);
    }
}

/// Store backed by a JSON object on disk.
///
/// The in-memory map is authoritative; every mutation rewrites the file and a
/// failed write is logged rather than surfaced.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &HashMap<String, String>) {
        if let Err(e) = write_json(&self.path, items) {
            warn!(error = %e, "Failed to persist durable storage (non-fatal)");
        }
    }
}

impl DurableStore for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        let mut items = self.items.lock();
        items.insert(key.to_string(), value.to_string());
        self.persist(&items);
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items.lock();
        if items.remove(key).is_some() {
            self.persist(&items);
        }
    }
}

fn write_json(path: &Path, items: &HashMap<String, String>) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_vec_pretty(items).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("refreshToken"), None);

        storage.set_item("refreshToken", "abc");
        assert_eq!(storage.get_item("refreshToken").as_deref(), Some("abc"));

        storage.remove_item("refreshToken");
        assert_eq!(storage.get_item("refreshToken"), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("refreshToken"), None);
        storage.set_item("refreshToken", "durable");
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("refreshToken").as_deref(), Some("durable"));

        reopened.remove_item("refreshToken");
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("refreshToken"), None);
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
