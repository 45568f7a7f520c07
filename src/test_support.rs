//! Test doubles shared by the unit tests.
//!
//! `FakeBackend` plays the HTTP collaborator: it accepts exactly one demo
//! account on login, registers anyone, and records every request it sees so
//! tests can assert on headers.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::net::api::{ApiClient, Endpoints};
use crate::net::authorizer::{AuthorizingTransport, RequestAuthorizer};
use crate::net::transport::{Transport, TransportError};
use crate::net::types::{ApiRequest, ApiResponse, User};
use crate::routes::{Navigator, Route};
use crate::state::session::{SessionManager, SessionStore};
use crate::storage::credentials::CredentialStore;
use crate::storage::{KeyValueStore, MemoryStore, StorageError};

pub const DEMO_LOGIN: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";

pub fn demo_user() -> User {
    User { id: "1".to_owned(), email: DEMO_LOGIN.to_owned(), login: DEMO_LOGIN.to_owned() }
}

// =============================================================================
// FakeBackend
// =============================================================================

#[derive(Default)]
pub struct FakeBackend {
    requests: RefCell<Vec<ApiRequest>>,
    offline: Cell<bool>,
    issued: Cell<u32>,
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }

    fn next_token(&self) -> String {
        let n = self.issued.get() + 1;
        self.issued.set(n);
        format!("mock-jwt-token-{n}")
    }

    fn respond(&self, request: &ApiRequest) -> ApiResponse {
        let body = request.body.clone().unwrap_or(Value::Null);
        let field = |name: &str| body.get(name).and_then(Value::as_str).unwrap_or_default().to_owned();

        if request.url.ends_with("/auth/login") {
            if field("login") == DEMO_LOGIN && field("password") == DEMO_PASSWORD {
                let user = User { id: "1".to_owned(), email: DEMO_LOGIN.to_owned(), login: field("login") };
                return ApiResponse::new(200, json!({ "token": self.next_token(), "user": user }));
            }
            return ApiResponse::new(401, json!({ "message": "Invalid credentials" }));
        }
        if request.url.ends_with("/auth/register") {
            if field("login") == "taken" {
                return ApiResponse::new(409, json!({ "message": "Login already in use" }));
            }
            let user = User { id: "2".to_owned(), email: field("email"), login: field("login") };
            return ApiResponse::new(200, json!({ "token": self.next_token(), "user": user }));
        }
        if request.url.ends_with("/auth/refresh") {
            if request.header("Authorization").is_none() {
                return ApiResponse::new(401, Value::Null);
            }
            return ApiResponse::new(200, json!({ "token": self.next_token(), "user": demo_user() }));
        }
        if request.url.ends_with("/auth/logout") {
            return ApiResponse::new(204, Value::Null);
        }
        ApiResponse::new(404, json!({ "error": "not found" }))
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.get() {
            return Err(TransportError::Connection { url: request.url, message: "connection refused".to_owned() });
        }
        Ok(self.respond(&request))
    }
}

// =============================================================================
// FailingStore
// =============================================================================

/// Memory store that can be told to fail reads or writes for chosen keys.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing_writes: RefCell<HashSet<String>>,
    failing_reads: Cell<bool>,
}

impl FailingStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn fail_writes_to(&self, key: &str) {
        self.failing_writes.borrow_mut().insert(key.to_owned());
    }

    pub fn fail_reads(&self) {
        self.failing_reads.set(true);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing_reads.get() {
            return Err(StorageError::Read { key: key.to_owned(), message: "disk on fire".to_owned() });
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing_writes.borrow().contains(key) {
            return Err(StorageError::Write { key: key.to_owned(), message: "quota exceeded".to_owned() });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.failing_writes.borrow().contains(key) {
            return Err(StorageError::Remove { key: key.to_owned(), message: "quota exceeded".to_owned() });
        }
        self.inner.remove(key)
    }
}

// =============================================================================
// RecordingNavigator
// =============================================================================

#[derive(Default)]
pub struct RecordingNavigator {
    routes: RefCell<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.borrow().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.borrow_mut().push(route);
    }
}

// =============================================================================
// Wiring
// =============================================================================

/// A session manager wired the way `AppContext` wires it, over test doubles.
pub struct Harness {
    pub store: Rc<dyn KeyValueStore>,
    pub backend: Rc<FakeBackend>,
    pub navigator: Rc<RecordingNavigator>,
    pub session: SessionManager,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(Rc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Rc<dyn KeyValueStore>) -> Self {
        let backend = FakeBackend::new();
        let navigator = RecordingNavigator::new();
        let session_store = SessionStore::new();
        let transport = AuthorizingTransport::new(backend.clone(), RequestAuthorizer::new(session_store));
        let api = ApiClient::new(Endpoints::default(), Rc::new(transport));
        let session = SessionManager::new(session_store, CredentialStore::new(store.clone()), api, navigator.clone());
        Self { store, backend, navigator, session }
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(self.store.clone())
    }
}
