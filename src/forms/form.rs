//! Reactive-form model: named fields with validators and interaction state.
//!
//! A field's message only shows once the user has touched it; a failed
//! submit touches every field at once.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use super::validators::{ValidationFailure, Validator};

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    value: String,
    initial: String,
    validators: Vec<Validator>,
    touched: bool,
    dirty: bool,
}

impl FormField {
    pub fn new(name: &'static str, label: &'static str, validators: Vec<Validator>) -> Self {
        Self {
            name,
            label,
            value: String::new(),
            initial: String::new(),
            validators,
            touched: false,
            dirty: false,
        }
    }

    /// Start with `initial`, which `reset` returns to.
    #[must_use]
    pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = initial.into();
        self.value.clone_from(&self.initial);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// User edit: marks the field dirty.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    /// Programmatic fill: leaves interaction flags alone.
    pub fn patch_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Every rule the current value breaks, in declaration order.
    pub fn errors(&self) -> Vec<ValidationFailure> {
        self.validators.iter().filter_map(|v| v.check(&self.value)).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validators.iter().all(|v| v.check(&self.value).is_none())
    }

    /// The failure to show, by display priority.
    pub fn active_error(&self) -> Option<ValidationFailure> {
        self.errors().into_iter().min_by_key(ValidationFailure::priority)
    }

    /// Message for the active error; empty until the field is touched.
    pub fn error_message(&self) -> String {
        if !self.touched {
            return String::new();
        }
        self.active_error().map(|e| e.message(self.label)).unwrap_or_default()
    }

    /// Back to the initial value, untouched and pristine.
    pub fn reset(&mut self) {
        self.value.clone_from(&self.initial);
        self.touched = false;
        self.dirty = false;
    }

    /// Upper bound from a `MaxLength` rule, if any.
    pub fn character_limit(&self) -> Option<usize> {
        self.validators.iter().find_map(|v| match v {
            Validator::MaxLength(n) => Some(*n),
            _ => None,
        })
    }
}

/// Ordered set of fields addressed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Form {
    fields: Vec<FormField>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Current value of `name`, empty for unknown fields.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map_or("", FormField::value)
    }

    /// User edit of `name`. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(name) {
            field.set_value(value);
        }
    }

    pub fn patch_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(name) {
            field.patch_value(value);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FormField::is_valid)
    }

    pub fn mark_all_touched(&mut self) {
        self.fields.iter_mut().for_each(FormField::mark_touched);
    }

    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(FormField::reset);
    }

    pub fn error_message(&self, name: &str) -> String {
        self.field(name).map(FormField::error_message).unwrap_or_default()
    }

    /// Invalid and either touched or edited.
    pub fn is_field_invalid(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| !f.is_valid() && (f.is_touched() || f.is_dirty()))
    }

    pub fn character_count(&self, name: &str) -> usize {
        self.value(name).chars().count()
    }

    pub fn character_limit(&self, name: &str) -> Option<usize> {
        self.field(name).and_then(FormField::character_limit)
    }

    /// `(field, message)` for every touched field with an active error.
    pub fn field_errors(&self) -> Vec<(&'static str, String)> {
        self.fields
            .iter()
            .map(|f| (f.name, f.error_message()))
            .filter(|(_, message)| !message.is_empty())
            .collect()
    }
}
