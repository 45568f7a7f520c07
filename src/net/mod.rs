//! Networking modules for the HTTP collaborator.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the wire schema, `transport` moves requests over a concrete
//! HTTP stack, `authorizer` decorates outgoing requests with the session's
//! bearer token, and `api` maps the auth endpoints onto typed calls.

pub mod api;
pub mod authorizer;
pub mod transport;
pub mod types;
