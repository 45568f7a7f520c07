//! Persisted session credentials.
//!
//! Two independent records: `auth_token` holds the raw bearer token and
//! `auth_user` the JSON-serialized `User`. A session is only restorable when
//! both are present; writes roll back so a token never outlives a failed user
//! write.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::rc::Rc;

use super::{KeyValueStore, StorageError};
use crate::net::types::User;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("stored user record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Token and user read back from storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct CredentialStore {
    store: Rc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the stored session. `Ok(None)` when either record is missing or empty.
    ///
    /// # Errors
    ///
    /// Returns `Corrupt` if the user record does not parse, or `Storage` if the
    /// backend cannot be read.
    pub fn load(&self) -> Result<Option<StoredSession>, CredentialError> {
        let token = self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let raw_user = self.store.get(USER_KEY)?.filter(|u| !u.is_empty());
        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            return Ok(None);
        };
        let user = serde_json::from_str(&raw_user)?;
        Ok(Some(StoredSession { token, user }))
    }

    /// Persist `token` and `user`. Either both records are written or storage
    /// is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure.
    pub fn save(&self, token: &str, user: &User) -> Result<(), CredentialError> {
        let raw_user = serde_json::to_string(user)?;
        let previous_token = self.store.get(TOKEN_KEY)?;
        self.store.set(TOKEN_KEY, token)?;
        if let Err(e) = self.store.set(USER_KEY, &raw_user) {
            let rollback = match previous_token {
                Some(previous) => self.store.set(TOKEN_KEY, &previous),
                None => self.store.remove(TOKEN_KEY),
            };
            if let Err(rollback_err) = rollback {
                tracing::error!(error = %rollback_err, "credential rollback failed");
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Remove both records. Both removals are attempted; the first failure is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if either record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }
}
