//! Per-field validation rules and their user-facing messages.
//!
//! DESIGN
//! ======
//! Every validator except `Required` accepts an empty value, so an optional
//! field only reports format problems once something is typed. When a field
//! breaks several rules, the one shown is picked by a fixed priority:
//! required, pattern, min length, max length, range min, range max, then
//! anything else (email or number format).

#[cfg(test)]
#[path = "validators_test.rs"]
mod validators_test;

use std::sync::LazyLock;

use regex::Regex;

static HTTP_URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.+$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid regex")
});

/// Named formats a field can be held to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `http://` or `https://` followed by anything.
    HttpUrl,
}

impl Pattern {
    pub fn is_match(self, value: &str) -> bool {
        match self {
            Self::HttpUrl => HTTP_URL_RE.is_match(value),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::HttpUrl => "Please enter a valid URL (http:// or https://)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Validator {
    Required,
    Email,
    /// Must parse as a number; the range rules skip anything that doesn't.
    Numeric,
    Pattern(Pattern),
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
}

impl Validator {
    /// The failure `value` produces under this rule, if any.
    pub fn check(&self, value: &str) -> Option<ValidationFailure> {
        if value.is_empty() && !matches!(self, Self::Required) {
            return None;
        }
        match *self {
            Self::Required => value.trim().is_empty().then_some(ValidationFailure::Required),
            Self::Email => (!EMAIL_RE.is_match(value)).then_some(ValidationFailure::Email),
            Self::Numeric => parse_number(value).is_none().then_some(ValidationFailure::NotANumber),
            Self::Pattern(pattern) => (!pattern.is_match(value)).then_some(ValidationFailure::Pattern(pattern)),
            Self::MinLength(required) => {
                let actual = value.chars().count();
                (actual < required).then_some(ValidationFailure::MinLength { required, actual })
            }
            Self::MaxLength(required) => {
                let actual = value.chars().count();
                (actual > required).then_some(ValidationFailure::MaxLength { required, actual })
            }
            Self::Min(min) => {
                let actual = parse_number(value)?;
                (actual < min).then_some(ValidationFailure::Min { min, actual })
            }
            Self::Max(max) => {
                let actual = parse_number(value)?;
                (actual > max).then_some(ValidationFailure::Max { max, actual })
            }
        }
    }
}

/// Non-numeric input is left to `Numeric`.
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// One broken rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValidationFailure {
    Required,
    Pattern(Pattern),
    MinLength { required: usize, actual: usize },
    MaxLength { required: usize, actual: usize },
    Min { min: f64, actual: f64 },
    Max { max: f64, actual: f64 },
    Email,
    NotANumber,
}

impl ValidationFailure {
    /// Display rank; lower wins.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Required => 0,
            Self::Pattern(_) => 1,
            Self::MinLength { .. } => 2,
            Self::MaxLength { .. } => 3,
            Self::Min { .. } => 4,
            Self::Max { .. } => 5,
            Self::Email | Self::NotANumber => 6,
        }
    }

    pub fn message(&self, label: &str) -> String {
        match self {
            Self::Required => format!("{label} is required"),
            Self::Pattern(pattern) => pattern.message().to_owned(),
            Self::MinLength { required, .. } => format!("{label} must be at least {required} characters"),
            Self::MaxLength { required, .. } => format!("{label} must be no more than {required} characters"),
            Self::Min { min, .. } => format!("{label} must be at least {min}"),
            Self::Max { max, .. } => format!("{label} must be no more than {max}"),
            Self::Email => "Please enter a valid email address".to_owned(),
            Self::NotANumber => format!("{label} must be a number"),
        }
    }
}
