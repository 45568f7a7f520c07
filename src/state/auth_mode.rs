//! Login/register card state machine.
//!
//! DESIGN
//! ======
//! Two states, one symmetric toggle. Each sub-form keeps its own field state
//! while hidden, so switching back does not lose typed input.

#[cfg(test)]
#[path = "auth_mode_test.rs"]
mod auth_mode_test;

use std::fmt;
use std::str::FromStr;

use crate::forms::login::LoginForm;
use crate::forms::register::RegisterForm;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown auth form `{0}` (expected `login` or `register`)")]
pub struct UnknownAuthMode(pub String);

impl FromStr for AuthMode {
    type Err = UnknownAuthMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            _ => Err(UnknownAuthMode(s.to_owned())),
        }
    }
}

/// The auth screen: which form is showing plus both forms' state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthCard {
    mode: AuthMode,
    pub login: LoginForm,
    pub register: RegisterForm,
}

impl AuthCard {
    pub fn new(initial: AuthMode) -> Self {
        Self { mode: initial, login: LoginForm::new(), register: RegisterForm::new() }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn switch_to(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    /// Show the other form and return the new mode.
    pub fn toggle(&mut self) -> AuthMode {
        self.mode = self.mode.toggled();
        self.mode
    }
}
