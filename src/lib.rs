//! # reviewdesk
//!
//! Client core for the review dashboard: authentication session state,
//! bearer-token request authorization, the project configuration repository,
//! and the form controllers behind the login, register, and project-setup
//! screens.
//!
//! Browser builds (`hydrate`) persist to `localStorage` and talk HTTP through
//! `gloo-net`. Native builds (`native`, the default) persist to a JSON file,
//! talk HTTP through `reqwest`, and ship the `reviewdesk` command-line binary.

pub mod app;
pub mod config;
pub mod forms;
pub mod net;
pub mod routes;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod util;

#[cfg(test)]
mod test_support;
