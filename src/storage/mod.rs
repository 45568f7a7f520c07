//! Key-value persistence shared by the credential store and the project
//! configuration repository.
//!
//! DESIGN
//! ======
//! The browser's `localStorage` is synchronous string-to-string storage, so
//! `KeyValueStore` mirrors that shape exactly. Native builds back it with a
//! JSON file (`file`), browser builds with `localStorage` (`local`), and tests
//! with the in-memory map (`memory`).
//!
//! Stores are shared through `Rc<dyn KeyValueStore>`: the client runs on a
//! single-threaded event loop and several services write to the same surface.

pub mod credentials;
#[cfg(feature = "native")]
pub mod file;
#[cfg(feature = "hydrate")]
pub mod local;
pub mod memory;

pub use memory::MemoryStore;

/// Failure reported by a key-value backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },
    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },
    #[error("failed to remove `{key}`: {message}")]
    Remove { key: String, message: String },
}

/// Synchronous string key-value surface (a `localStorage` analogue).
///
/// Methods take `&self`; implementations use interior mutability so one store
/// can be shared between services.
pub trait KeyValueStore {
    /// Read `key`. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
