//! Registration form controller.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use super::login::failure_message;
use super::{Form, FormField, SubmitOutcome, Validator};
use crate::net::types::RegisterRequest;
use crate::routes::{Navigator, Route};
use crate::state::session::SessionManager;

pub const EMAIL: &str = "email";
pub const LOGIN: &str = "login";
pub const PASSWORD: &str = "password";
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct RegisterForm {
    form: Form,
    registration_failed: bool,
    error: Option<String>,
    submitting: bool,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new(EMAIL, "Email", vec![Validator::Required, Validator::Email]),
                FormField::new(LOGIN, "Login", vec![Validator::Required]),
                FormField::new(
                    PASSWORD,
                    "Password",
                    vec![Validator::Required, Validator::MinLength(MIN_PASSWORD_LENGTH)],
                ),
            ]),
            registration_failed: false,
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

    /// Set when the server refused the last registration.
    pub fn registration_failed(&self) -> bool {
        self.registration_failed
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.form.value(EMAIL).to_owned(),
            login: self.form.value(LOGIN).to_owned(),
            password: self.form.value(PASSWORD).to_owned(),
        }
    }

    /// Validate, register, and move to the dashboard on success.
    pub async fn submit(&mut self, session: &SessionManager, navigator: &dyn Navigator) -> SubmitOutcome {
        if !self.form.is_valid() {
            self.form.mark_all_touched();
            return SubmitOutcome::Invalid;
        }
        self.submitting = true;
        let result = session.register(&self.request()).await;
        self.submitting = false;
        match result {
            Ok(_) => {
                self.registration_failed = false;
                self.error = None;
                navigator.navigate(Route::dashboard());
                SubmitOutcome::Submitted
            }
            Err(e) => {
                let message = failure_message(&e);
                self.registration_failed = true;
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
