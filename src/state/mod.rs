//! Client-side state owned by the session, configuration, and chrome layers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read these types; only their managers mutate them.

pub mod auth_mode;
pub mod project_config;
pub mod session;
pub mod sidebar;
