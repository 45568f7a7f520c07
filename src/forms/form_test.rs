use super::*;
use crate::forms::validators::Pattern;

fn url_form() -> Form {
    Form::new(vec![
        FormField::new("url", "LLM Source URL", vec![Validator::Required, Validator::Pattern(Pattern::HttpUrl)]),
        FormField::new("notes", "Notes", vec![Validator::MaxLength(5)]),
    ])
}

// =============================================================
// FormField
// =============================================================

#[test]
fn message_hidden_until_touched() {
    let mut field = FormField::new("model", "Model", vec![Validator::Required]);
    assert!(!field.is_valid());
    assert_eq!(field.error_message(), "");
    field.mark_touched();
    assert_eq!(field.error_message(), "Model is required");
}

#[test]
fn active_error_follows_priority_not_declaration_order() {
    let mut field = FormField::new("pw", "Password", vec![Validator::MaxLength(3), Validator::MinLength(2)]);
    field.patch_value("x");
    assert_eq!(field.active_error(), Some(ValidationFailure::MinLength { required: 2, actual: 1 }));

    let mut field = FormField::new("email", "Email", vec![Validator::Email, Validator::Required]);
    field.patch_value(" ");
    assert_eq!(field.active_error(), Some(ValidationFailure::Required));
}

#[test]
fn set_value_marks_dirty_patch_does_not() {
    let mut field = FormField::new("name", "Name", vec![]);
    field.patch_value("a");
    assert!(!field.is_dirty());
    field.set_value("b");
    assert!(field.is_dirty());
    assert_eq!(field.value(), "b");
}

#[test]
fn reset_restores_initial_and_flags() {
    let mut field = FormField::new("temperature", "Temperature", vec![]).with_initial("0.2");
    field.set_value("0.9");
    field.mark_touched();
    field.reset();
    assert_eq!(field.value(), "0.2");
    assert!(!field.is_touched());
    assert!(!field.is_dirty());
}

// =============================================================
// Form
// =============================================================

#[test]
fn pattern_message_shown_after_touch() {
    let mut form = url_form();
    form.set_value("url", "ftp://x");
    form.mark_all_touched();
    assert_eq!(form.error_message("url"), "Please enter a valid URL (http:// or https://)");
}

#[test]
fn field_invalid_when_dirty_even_if_untouched() {
    let mut form = url_form();
    assert!(!form.is_field_invalid("url"));
    form.set_value("url", "nope");
    assert!(form.is_field_invalid("url"));
    form.set_value("url", "https://ok");
    assert!(!form.is_field_invalid("url"));
}

#[test]
fn mark_all_touched_reveals_every_error() {
    let mut form = url_form();
    form.patch_value("notes", "toolong");
    assert!(form.field_errors().is_empty());
    form.mark_all_touched();
    assert_eq!(
        form.field_errors(),
        vec![
            ("url", "LLM Source URL is required".to_owned()),
            ("notes", "Notes must be no more than 5 characters".to_owned()),
        ]
    );
}

#[test]
fn character_count_and_limit() {
    let mut form = url_form();
    form.set_value("notes", "héllo");
    assert_eq!(form.character_count("notes"), 5);
    assert_eq!(form.character_limit("notes"), Some(5));
    assert_eq!(form.character_limit("url"), None);
}

#[test]
fn unknown_field_is_harmless() {
    let mut form = url_form();
    form.set_value("missing", "x");
    assert_eq!(form.value("missing"), "");
    assert_eq!(form.error_message("missing"), "");
    assert!(!form.is_field_invalid("missing"));
    assert_eq!(form.character_count("missing"), 0);
}

#[test]
fn form_validity_covers_all_fields() {
    let mut form = url_form();
    assert!(!form.is_valid());
    form.set_value("url", "https://x");
    assert!(form.is_valid());
    form.set_value("notes", "123456");
    assert!(!form.is_valid());
}
