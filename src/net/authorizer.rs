//! Bearer-token injection for outgoing requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request the client sends passes through `AuthorizingTransport`. If the
//! session holds a token and the URL is not a public endpoint, a copy of the
//! request gets `Authorization: Bearer <token>`; otherwise it is forwarded as
//! is. No retries, no short-circuit when the token is missing.

#[cfg(test)]
#[path = "authorizer_test.rs"]
mod authorizer_test;

use async_trait::async_trait;

use super::transport::{Transport, TransportError};
use super::types::{ApiRequest, ApiResponse};
use crate::state::session::SessionStore;

pub const AUTHORIZATION: &str = "Authorization";

/// Paths reachable without credentials; matched as substrings of the URL.
pub const PUBLIC_ENDPOINTS: [&str; 2] = ["/auth/login", "/auth/register"];

#[derive(Clone, Debug)]
pub struct RequestAuthorizer {
    session: SessionStore,
    public_endpoints: Vec<String>,
}

impl RequestAuthorizer {
    pub fn new(session: SessionStore) -> Self {
        Self::with_public_endpoints(session, PUBLIC_ENDPOINTS)
    }

    pub fn with_public_endpoints<I, S>(session: SessionStore, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { session, public_endpoints: endpoints.into_iter().map(Into::into).collect() }
    }

    pub fn is_public(&self, url: &str) -> bool {
        self.public_endpoints.iter().any(|endpoint| url.contains(endpoint.as_str()))
    }

    /// Copy of `request`, with a bearer header when one applies.
    pub fn authorize(&self, request: &ApiRequest) -> ApiRequest {
        let mut authorized = request.clone();
        if self.is_public(&request.url) {
            return authorized;
        }
        if let Some(token) = self.session.token() {
            authorized.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
        authorized
    }
}

/// Transport decorator that runs every request through a `RequestAuthorizer`.
pub struct AuthorizingTransport<T> {
    inner: T,
    authorizer: RequestAuthorizer,
}

impl<T: Transport> AuthorizingTransport<T> {
    pub fn new(inner: T, authorizer: RequestAuthorizer) -> Self {
        Self { inner, authorizer }
    }
}

#[async_trait(?Send)]
impl<T: Transport> Transport for AuthorizingTransport<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let request = self.authorizer.authorize(&request);
        self.inner.send(request).await
    }
}
