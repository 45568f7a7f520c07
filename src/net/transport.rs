//! HTTP transports.
//!
//! Client-side (hydrate): `GlooTransport` issues browser fetches via
//! `gloo-net`. Native: `ReqwestTransport`.
//!
//! ERROR HANDLING
//! ==============
//! A transport only fails when no HTTP response was obtained. Non-2xx statuses
//! come back as ordinary `ApiResponse`s; interpreting them is the caller's job.

use std::rc::Rc;

use async_trait::async_trait;

use super::types::{ApiRequest, ApiResponse};
#[cfg(any(feature = "native", feature = "hydrate"))]
use super::types::Method;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Connection { url: String, message: String },
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// Sends one request and returns the response.
///
/// Futures are `?Send`: the client runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns an error if no HTTP response could be obtained.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Native HTTP transport backed by `reqwest`.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(feature = "native")]
impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "native")]
#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Connection { url: request.url.clone(), message: e.to_string() })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(ApiResponse::from_text(status, &text))
    }
}

/// Browser HTTP transport backed by `gloo-net`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let connection_failed =
            |e: gloo_net::Error| TransportError::Connection { url: request.url.clone(), message: e.to_string() };
        let response = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| TransportError::Encode(e.to_string()))?
                .send()
                .await
                .map_err(connection_failed)?,
            None => builder.send().await.map_err(connection_failed)?,
        };
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(ApiResponse::from_text(status, &text))
    }
}
