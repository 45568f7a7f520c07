//! Dependency wiring for the client.
//!
//! ARCHITECTURE
//! ============
//! One key-value store backs both the credential records and the project
//! configuration. Every HTTP call goes through an `AuthorizingTransport` that
//! reads the token from the same `SessionStore` the session manager publishes
//! to, so a login is visible to the next request without extra plumbing.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::forms::project_setup::ProjectSetupForm;
use crate::net::api::ApiClient;
use crate::net::authorizer::{AuthorizingTransport, RequestAuthorizer};
use crate::net::transport::Transport;
use crate::routes::Navigator;
use crate::state::auth_mode::AuthCard;
use crate::state::project_config::ConfigRepository;
use crate::state::session::{SessionManager, SessionStore};
use crate::storage::KeyValueStore;
use crate::storage::credentials::CredentialStore;

#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionManager,
    pub projects: ConfigRepository,
    pub navigator: Rc<dyn Navigator>,
}

impl AppContext {
    /// Wire the services over the given platform pieces. Any stored session
    /// is restored before this returns.
    pub fn new(
        config: ClientConfig,
        store: Rc<dyn KeyValueStore>,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let session_store = SessionStore::new();
        let transport = AuthorizingTransport::new(transport, RequestAuthorizer::new(session_store));
        let api = ApiClient::new(config.endpoints.clone(), Rc::new(transport));
        let session = SessionManager::new(session_store, CredentialStore::new(store.clone()), api, navigator.clone());
        let projects = ConfigRepository::new(store, config.latency());
        Self { config, session, projects, navigator }
    }

    /// A fresh auth card in the configured starting mode.
    pub fn auth_card(&self) -> AuthCard {
        AuthCard::new(self.config.initial_auth_mode)
    }

    pub fn project_setup(&self) -> ProjectSetupForm {
        ProjectSetupForm::new()
    }

    /// File-backed store, `reqwest` transport, signal-backed navigation.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file exists but cannot be read.
    #[cfg(feature = "native")]
    pub fn native(config: ClientConfig) -> Result<(Self, crate::routes::CurrentRoute), crate::storage::StorageError> {
        use crate::net::transport::ReqwestTransport;
        use crate::routes::CurrentRoute;
        use crate::storage::file::FileStore;

        let store = Rc::new(FileStore::open(&config.store_path)?);
        let route = CurrentRoute::default();
        let context = Self::new(config, store, Rc::new(ReqwestTransport::new()), Rc::new(route));
        Ok((context, route))
    }

    /// `localStorage`, `gloo-net`, and `window.location` navigation.
    #[cfg(feature = "hydrate")]
    pub fn browser(config: ClientConfig) -> Self {
        use crate::net::transport::GlooTransport;
        use crate::routes::BrowserNavigator;
        use crate::storage::local::LocalStorage;

        Self::new(config, Rc::new(LocalStorage), Rc::new(GlooTransport), Rc::new(BrowserNavigator))
    }
}

/// Browser entry point: install logging, restore the session, and bounce
/// anonymous visitors off protected paths.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use crate::routes::{Route, guard};

    crate::telemetry::init_browser();
    let app = AppContext::browser(ClientConfig::default());

    let path = web_sys::window().and_then(|w| w.location().pathname().ok()).unwrap_or_default();
    let requested = Route::parse(&path);
    let landed = guard(requested, &app.session.store().snapshot());
    if landed != requested {
        app.navigator.navigate(landed);
    }
}
