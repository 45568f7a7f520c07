//! Authentication session for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the reactive snapshot the UI, route guard, and request
//! authorizer read. `SessionManager` is the only writer: it talks to the auth
//! endpoints, persists credentials, and navigates on logout.
//!
//! DESIGN
//! ======
//! Login, register, and refresh share one path: call the endpoint, persist
//! `{token, user}`, then publish the new session. Persistence happens before
//! the in-memory update, so a failed write leaves both the stored records
//! and the published session as they were.
//!
//! TRADE-OFFS
//! ==========
//! Overlapping operations are not serialized. Whichever completes last owns
//! the session fields; the loading flag is a counter so it stays raised
//! until every in-flight operation has settled.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use leptos::prelude::*;

use crate::net::api::{ApiClient, AuthError};
use crate::net::transport::TransportError;
use crate::net::types::{AuthResponse, Credentials, RegisterRequest, User};
use crate::routes::{Navigator, Route};
use crate::storage::credentials::{CredentialError, CredentialStore};

/// Published session fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// In-flight login/register/refresh operations.
    pub pending: u32,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

/// Copyable handle over the reactive session signal.
#[derive(Clone, Copy, Debug)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self { state: RwSignal::new(SessionState::default()) }
    }

    /// Subscribable view for components.
    pub fn signal(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with_untracked(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with_untracked(SessionState::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with_untracked(SessionState::is_loading)
    }

    pub(crate) fn set_session(&self, token: String, user: User) {
        self.state.update(|s| {
            s.token = Some(token);
            s.user = Some(user);
        });
    }

    pub(crate) fn clear(&self) {
        self.state.update(|s| {
            s.token = None;
            s.user = None;
        });
    }

    fn begin(&self) {
        self.state.update(|s| s.pending += 1);
    }

    fn finish(&self) {
        self.state.update(|s| s.pending = s.pending.saturating_sub(1));
    }
}

/// Owner of every session mutation.
#[derive(Clone)]
pub struct SessionManager {
    store: SessionStore,
    credentials: CredentialStore,
    api: ApiClient,
    navigator: Rc<dyn Navigator>,
}

impl SessionManager {
    /// Build the manager and restore any stored session.
    pub fn new(store: SessionStore, credentials: CredentialStore, api: ApiClient, navigator: Rc<dyn Navigator>) -> Self {
        let manager = Self { store, credentials, api, navigator };
        manager.restore_from_storage();
        manager
    }

    /// Publish the stored session if both records are present and parse.
    /// A corrupt user record clears both records. Returns whether a session
    /// was restored.
    pub fn restore_from_storage(&self) -> bool {
        match self.credentials.load() {
            Ok(Some(stored)) => {
                tracing::info!(user_id = %stored.user.id, "session restored");
                self.store.set_session(stored.token, stored.user);
                true
            }
            Ok(None) => {
                tracing::debug!("no stored session");
                false
            }
            Err(CredentialError::Corrupt(e)) => {
                tracing::error!(error = %e, "stored session is corrupt; clearing");
                if let Err(e) = self.credentials.clear() {
                    tracing::warn!(error = %e, "failed to clear corrupt session");
                }
                self.store.clear();
                false
            }
            Err(CredentialError::Storage(e)) => {
                tracing::warn!(error = %e, "stored session unreadable");
                false
            }
        }
    }

    /// # Errors
    ///
    /// Returns the endpoint's error, or `AuthError::Storage` if the session
    /// could not be persisted. The session is unchanged on error.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        self.store.begin();
        let result = match self.api.login(credentials).await {
            Ok(response) => self.apply(response),
            Err(e) => Err(e),
        };
        self.store.finish();
        log_outcome("login", &result);
        result
    }

    /// # Errors
    ///
    /// Same contract as [`SessionManager::login`].
    pub async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        self.store.begin();
        let result = match self.api.register(data).await {
            Ok(response) => self.apply(response),
            Err(e) => Err(e),
        };
        self.store.finish();
        log_outcome("register", &result);
        result
    }

    /// Exchange the current token for a fresh one.
    ///
    /// # Errors
    ///
    /// Same contract as [`SessionManager::login`].
    pub async fn refresh(&self) -> Result<AuthResponse, AuthError> {
        self.store.begin();
        let result = match self.api.refresh().await {
            Ok(response) => self.apply(response),
            Err(e) => Err(e),
        };
        self.store.finish();
        log_outcome("refresh", &result);
        result
    }

    /// End the session and return to the auth card. The server is told first
    /// while the token is still attached; its answer does not matter.
    pub async fn logout(&self) {
        if self.store.token().is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!(error = %e, "server logout failed");
            }
        }
        self.store.clear();
        if let Err(e) = self.credentials.clear() {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        tracing::info!("logged out");
        self.navigator.navigate(Route::Auth);
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn store(&self) -> SessionStore {
        self.store
    }

    fn apply(&self, response: AuthResponse) -> Result<AuthResponse, AuthError> {
        self.credentials.save(&response.token, &response.user).map_err(|e| match e {
            CredentialError::Storage(e) => AuthError::Storage(e),
            CredentialError::Corrupt(e) => AuthError::Network(TransportError::Encode(e.to_string())),
        })?;
        self.store.set_session(response.token.clone(), response.user.clone());
        Ok(response)
    }
}

fn log_outcome(operation: &'static str, result: &Result<AuthResponse, AuthError>) {
    match result {
        Ok(response) => tracing::info!(operation, user_id = %response.user.id, "authenticated"),
        Err(e) => tracing::warn!(operation, error = %e, "authentication failed"),
    }
}
