//! Login form controller.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::{Form, FormField, SubmitOutcome, Validator};
use crate::net::api::AuthError;
use crate::net::types::Credentials;
use crate::routes::{Navigator, Route};
use crate::state::session::SessionManager;

pub const LOGIN: &str = "login";
pub const PASSWORD: &str = "password";

#[derive(Clone, Debug, PartialEq)]
pub struct LoginForm {
    form: Form,
    error: Option<String>,
    submitting: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new(LOGIN, "Login", vec![Validator::Required]),
                FormField::new(PASSWORD, "Password", vec![Validator::Required]),
            ]),
            error: None,
            submitting: false,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        self.form.set_value(field, value);
    }

    /// Form-level message from the last failed attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn credentials(&self) -> Credentials {
        Credentials { login: self.form.value(LOGIN).to_owned(), password: self.form.value(PASSWORD).to_owned() }
    }

    /// Validate, log in, and move to the dashboard on success.
    pub async fn submit(&mut self, session: &SessionManager, navigator: &dyn Navigator) -> SubmitOutcome {
        if !self.form.is_valid() {
            self.form.mark_all_touched();
            return SubmitOutcome::Invalid;
        }
        self.submitting = true;
        let result = session.login(&self.credentials()).await;
        self.submitting = false;
        match result {
            Ok(_) => {
                self.error = None;
                navigator.navigate(Route::dashboard());
                SubmitOutcome::Submitted
            }
            Err(e) => {
                let message = failure_message(&e);
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

/// User-facing text for a failed auth call.
pub(crate) fn failure_message(error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials => "Invalid login or password".to_owned(),
        AuthError::Rejected { message, .. } if !message.is_empty() => message.clone(),
        AuthError::Rejected { status, .. } => format!("Request failed with status {status}"),
        AuthError::Network(_) => "Unable to reach the server. Please try again.".to_owned(),
        AuthError::Storage(_) => "Sign-in succeeded on the server but could not be saved; please try again.".to_owned(),
    }
}
