//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::net::api::{
    DEFAULT_BASE_URL, DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH, DEFAULT_REFRESH_PATH, DEFAULT_REGISTER_PATH, Endpoints,
};
use crate::state::auth_mode::AuthMode;
use crate::state::project_config::SimulatedLatency;

pub const DEFAULT_STORE_PATH: &str = "reviewdesk-store.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientConfigError {
    #[error("invalid value for {var}: `{value}`")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    /// Backing file of the native key-value store.
    pub store_path: PathBuf,
    pub simulated_latency: bool,
    pub initial_auth_mode: AuthMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            simulated_latency: true,
            initial_auth_mode: AuthMode::Login,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `REVIEWDESK_API_BASE_URL`: default `http://localhost:3000`
    /// - `REVIEWDESK_LOGIN_PATH`: default `/api/auth/login`
    /// - `REVIEWDESK_REGISTER_PATH`: default `/api/auth/register`
    /// - `REVIEWDESK_REFRESH_PATH`: default `/auth/refresh`
    /// - `REVIEWDESK_LOGOUT_PATH`: default `/auth/logout`
    /// - `REVIEWDESK_STORE_PATH`: default `reviewdesk-store.json`
    /// - `REVIEWDESK_SIMULATED_LATENCY`: default `true`
    /// - `REVIEWDESK_INITIAL_AUTH_FORM`: `login` (default) or `register`
    ///
    /// # Errors
    ///
    /// Returns an error when a boolean or enumerated variable has an
    /// unrecognized value.
    pub fn from_env() -> Result<Self, ClientConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let endpoints = Endpoints {
            base_url: text("REVIEWDESK_API_BASE_URL", DEFAULT_BASE_URL).trim_end_matches('/').to_owned(),
            login: text("REVIEWDESK_LOGIN_PATH", DEFAULT_LOGIN_PATH),
            register: text("REVIEWDESK_REGISTER_PATH", DEFAULT_REGISTER_PATH),
            refresh: text("REVIEWDESK_REFRESH_PATH", DEFAULT_REFRESH_PATH),
            logout: text("REVIEWDESK_LOGOUT_PATH", DEFAULT_LOGOUT_PATH),
        };
        let store_path = PathBuf::from(text("REVIEWDESK_STORE_PATH", DEFAULT_STORE_PATH));
        let simulated_latency =
            parse_bool("REVIEWDESK_SIMULATED_LATENCY", lookup("REVIEWDESK_SIMULATED_LATENCY").as_deref(), true)?;
        let initial_auth_mode = parse_auth_mode(lookup("REVIEWDESK_INITIAL_AUTH_FORM").as_deref())?;

        Ok(Self { endpoints, store_path, simulated_latency, initial_auth_mode })
    }

    /// Repository delays implied by `simulated_latency`.
    pub fn latency(&self) -> SimulatedLatency {
        if self.simulated_latency { SimulatedLatency::default() } else { SimulatedLatency::none() }
    }
}

fn parse_bool(var: &'static str, raw: Option<&str>, default: bool) -> Result<bool, ClientConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ClientConfigError::Invalid { var, value: raw.to_owned() }),
    }
}

fn parse_auth_mode(raw: Option<&str>) -> Result<AuthMode, ClientConfigError> {
    raw.map_or(Ok(AuthMode::default()), |raw| {
        raw.parse()
            .map_err(|_| ClientConfigError::Invalid { var: "REVIEWDESK_INITIAL_AUTH_FORM", value: raw.to_owned() })
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
