//! Local key-value storage: string keys to string values, the model web apps get
//! from `localStorage`. Reads and writes are synchronous on the calling thread.

use crate::error::StoreError;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Capability injected into the favorites repository.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process storage; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<AHashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with_item(key: &str, value: &str) -> Self {
        let s = Self::default();
        s.lock().insert(key.to_string(), value.to_string());
        s
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Storage persisted as one pretty-printed JSON object in a file.
///
/// Every call re-reads the file, so several processes see each other's writes.
/// There is no locking: concurrent read-modify-write cycles can lose an update.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|_| StoreError::Corrupt {
            path: self.path.display().to_string(),
        })
    }

    /// Write via a temp file in the same directory, then rename over the target.
    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_err(e))?;
        let s = serde_json::to_string_pretty(items)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_err(e))?;
        tmp.write_all(s.as_bytes()).map_err(|e| self.io_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_err(e.error))?;
        log::debug!("wrote {} key(s) to {}", items.len(), self.path.display());
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}
