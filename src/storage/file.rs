//! JSON-file key-value store for native builds.
//!
//! The whole map lives in one pretty-printed JSON object. Every mutation
//! rewrites the file before the in-memory copy is updated, so a failed write
//! leaves both views unchanged.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing or empty file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON
    /// object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::Unavailable(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Unavailable(format!("{}: {e}", path.display()))),
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "file store opened");
        Ok(Self { path, entries: RefCell::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, raw).map_err(|e| e.to_string())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_owned(), value.to_owned());
        self.persist(&next)
            .map_err(|message| StorageError::Write { key: key.to_owned(), message })?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.entries.borrow().contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.borrow().clone();
        next.remove(key);
        self.persist(&next)
            .map_err(|message| StorageError::Remove { key: key.to_owned(), message })?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }
}
