//! Form controllers behind the login, register, and project-setup screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components bind inputs to these controllers and render their messages.
//! Controllers validate locally, then hand off to `SessionManager` or
//! `ConfigRepository`; collaborator failures come back as messages, never as
//! errors the component must handle.

pub mod form;
pub mod login;
pub mod notification;
pub mod project_setup;
pub mod register;
pub mod validators;

pub use form::{Form, FormField};
pub use notification::{Notification, NotificationKind};
pub use validators::{Pattern, ValidationFailure, Validator};

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; every field is now touched.
    Invalid,
    /// The collaborator accepted the submission.
    Submitted,
    /// The collaborator refused; the message is user-facing.
    Failed(String),
}
