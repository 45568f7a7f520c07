//! Typed calls against the backend's auth endpoints.
//!
//! | Operation | Path (default)       | Body                       |
//! |-----------|----------------------|----------------------------|
//! | login     | `/api/auth/login`    | `{login, password}`        |
//! | register  | `/api/auth/register` | `{email, login, password}` |
//! | refresh   | `/auth/refresh`      | `{}`                       |
//! | logout    | `/auth/logout`       | `{}`                       |
//!
//! ERROR HANDLING
//! ==============
//! 401/403 become `AuthError::InvalidCredentials`; any other non-2xx status is
//! `Rejected` with the server's message. Nothing here touches session state.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use serde_json::{Value, json};

use super::transport::{Transport, TransportError};
use super::types::{ApiRequest, ApiResponse, AuthResponse, Credentials, Method, RegisterRequest};
use crate::storage::StorageError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/login";
pub const DEFAULT_REGISTER_PATH: &str = "/api/auth/register";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";
pub const DEFAULT_LOGOUT_PATH: &str = "/auth/logout";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid login or password")]
    InvalidCredentials,
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network failure: {0}")]
    Network(#[from] TransportError),
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Base URL plus the path of each auth endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub login: String,
    pub register: String,
    pub refresh: String,
    pub logout: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            login: DEFAULT_LOGIN_PATH.to_owned(),
            register: DEFAULT_REGISTER_PATH.to_owned(),
            refresh: DEFAULT_REFRESH_PATH.to_owned(),
            logout: DEFAULT_LOGOUT_PATH.to_owned(),
        }
    }
}

impl Endpoints {
    /// Join the base URL with `path`.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
    }
}

/// Auth endpoint client. Bearer headers are added by whatever transport it is
/// given (normally an `AuthorizingTransport`).
#[derive(Clone)]
pub struct ApiClient {
    endpoints: Endpoints,
    transport: Rc<dyn Transport>,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints, transport: Rc<dyn Transport>) -> Self {
        Self { endpoints, transport }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// `POST {login}` with `{login, password}`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` on 401/403, `Rejected` on other non-2xx
    /// statuses, and `Network` when the request fails or the body is malformed.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        let body = serde_json::to_value(credentials).map_err(|e| TransportError::Encode(e.to_string()))?;
        let response = self.post(&self.endpoints.login, body).await?;
        decode_auth_response(response)
    }

    /// `POST {register}` with `{email, login, password}`.
    ///
    /// # Errors
    ///
    /// Same contract as [`ApiClient::login`].
    pub async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        let body = serde_json::to_value(data).map_err(|e| TransportError::Encode(e.to_string()))?;
        let response = self.post(&self.endpoints.register, body).await?;
        decode_auth_response(response)
    }

    /// `POST {refresh}` with `{}`; relies on the bearer header.
    ///
    /// # Errors
    ///
    /// Same contract as [`ApiClient::login`].
    pub async fn refresh(&self) -> Result<AuthResponse, AuthError> {
        let response = self.post(&self.endpoints.refresh, json!({})).await?;
        decode_auth_response(response)
    }

    /// `POST {logout}` with `{}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.post(&self.endpoints.logout, json!({})).await?;
        Ok(())
    }

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, AuthError> {
        let request = ApiRequest::new(Method::Post, self.endpoints.url(path)).with_body(body);
        let response = self.transport.send(request).await?;
        if response.is_success() { Ok(response) } else { Err(rejection(&response)) }
    }
}

fn rejection(response: &ApiResponse) -> AuthError {
    match response.status {
        401 | 403 => AuthError::InvalidCredentials,
        status => AuthError::Rejected { status, message: error_message(&response.body) },
    }
}

fn error_message(body: &Value) -> String {
    if let Some(message) = ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
    {
        return message.to_owned();
    }
    match body {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn decode_auth_response(response: ApiResponse) -> Result<AuthResponse, AuthError> {
    let parsed: AuthResponse =
        serde_json::from_value(response.body).map_err(|e| TransportError::Decode(e.to_string()))?;
    if parsed.token.is_empty() {
        return Err(TransportError::Decode("response carried an empty token".to_owned()).into());
    }
    Ok(parsed)
}
