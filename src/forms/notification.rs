//! Transient snackbar messages.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

impl NotificationKind {
    /// CSS class of the snackbar panel.
    pub fn panel_class(self) -> &'static str {
        match self {
            Self::Success => "success-snackbar",
            Self::Info => "info-snackbar",
            Self::Error => "error-snackbar",
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            Self::Success | Self::Info => Duration::from_millis(3000),
            Self::Error => Duration::from_millis(5000),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }

    pub fn duration(&self) -> Duration {
        self.kind.duration()
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}
