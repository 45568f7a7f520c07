//! Browser `localStorage` backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only compiled for `hydrate`. The storage handle is looked up on every call,
//! so a store created before the window is ready still works once it is.

use super::{KeyValueStore, StorageError};

/// `window.localStorage` as a `KeyValueStore`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StorageError::Unavailable("window.localStorage".to_owned()))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read { key: key.to_owned(), message: format!("{e:?}") })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write { key: key.to_owned(), message: format!("{e:?}") })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Remove { key: key.to_owned(), message: format!("{e:?}") })
    }
}
