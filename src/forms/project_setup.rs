//! Project-setup form controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs the dashboard's project-setup view: loads the stored configuration
//! into the form, validates edits field by field, and saves through
//! `ConfigRepository`. Every outcome is reported as a `Notification`.

#[cfg(test)]
#[path = "project_setup_test.rs"]
mod project_setup_test;

use super::{Form, FormField, Notification, Pattern, Validator};
use crate::state::project_config::{
    ConfigRepository, DEFAULT_TEMPERATURE, INSTRUCTION_LIMIT, PROMPT_LIMIT, ProjectConfiguration, TEMPERATURE_OPTIONS,
};

pub const GITHUB_TOKEN: &str = "githubToken";
pub const LLM_API_TOKEN: &str = "llmApiToken";
pub const LLM_SOURCE_URL: &str = "llmSourceUrl";
pub const MODEL: &str = "model";
pub const NAME: &str = "name";
pub const TEMPERATURE: &str = "temperature";
pub const INSTRUCTION: &str = "instruction";
pub const PROMPT: &str = "prompt";

pub const SAVED: &str = "Configuration saved successfully!";
pub const INVALID: &str = "Please fill in all required fields correctly.";
pub const RESET: &str = "Form has been reset to default values.";

/// Inputs rendered as password fields with a show/hide toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretField {
    GithubToken,
    LlmApiToken,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectSetupForm {
    form: Form,
    loading: bool,
    saving: bool,
    hide_github_token: bool,
    hide_llm_api_token: bool,
}

impl Default for ProjectSetupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectSetupForm {
    pub fn new() -> Self {
        let required = |name, label| FormField::new(name, label, vec![Validator::Required]);
        Self {
            form: Form::new(vec![
                required(GITHUB_TOKEN, "GitHub Token"),
                required(LLM_API_TOKEN, "LLM API Token"),
                FormField::new(
                    LLM_SOURCE_URL,
                    "LLM Source URL",
                    vec![Validator::Required, Validator::Pattern(Pattern::HttpUrl)],
                ),
                required(MODEL, "Model"),
                required(NAME, "Project Name"),
                FormField::new(
                    TEMPERATURE,
                    "Temperature",
                    vec![Validator::Numeric, Validator::Min(0.0), Validator::Max(1.0)],
                )
                    .with_initial(DEFAULT_TEMPERATURE.to_string()),
                FormField::new(INSTRUCTION, "Instruction", vec![Validator::MaxLength(INSTRUCTION_LIMIT)]),
                FormField::new(PROMPT, "Prompt", vec![Validator::MaxLength(PROMPT_LIMIT)]),
            ]),
            loading: false,
            saving: false,
            hide_github_token: true,
            hide_llm_api_token: true,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        self.form.set_value(field, value);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// `(value, label)` pairs for the temperature select.
    pub fn temperature_options() -> Vec<(f64, String)> {
        TEMPERATURE_OPTIONS.iter().map(|t| (*t, format!("{t:.1}"))).collect()
    }

    /// Fill the form from the repository. Returns a notification only on failure.
    pub async fn load(&mut self, repo: &ConfigRepository) -> Option<Notification> {
        self.loading = true;
        let result = repo.load().await;
        self.loading = false;
        match result {
            Ok(config) => {
                self.patch(&config);
                None
            }
            Err(e) => Some(Notification::error(format!("Failed to load configuration: {e}"))),
        }
    }

    /// Copy `config` into the fields without marking them edited.
    pub fn patch(&mut self, config: &ProjectConfiguration) {
        let temperature = config.temperature.map(|t| t.to_string()).unwrap_or_default();
        let values = [
            (GITHUB_TOKEN, config.github_token.as_str()),
            (LLM_API_TOKEN, config.llm_api_token.as_str()),
            (LLM_SOURCE_URL, config.llm_source_url.as_str()),
            (MODEL, config.model.as_str()),
            (NAME, config.name.as_str()),
            (TEMPERATURE, temperature.as_str()),
            (INSTRUCTION, config.instruction.as_str()),
            (PROMPT, config.prompt.as_str()),
        ];
        for (name, value) in values {
            self.form.patch_value(name, value);
        }
    }

    /// The configuration the fields currently describe. A blank temperature
    /// is absent; one that does not parse becomes NaN and fails validation.
    pub fn configuration(&self) -> ProjectConfiguration {
        let temperature = self.form.value(TEMPERATURE).trim();
        ProjectConfiguration {
            github_token: self.form.value(GITHUB_TOKEN).to_owned(),
            llm_api_token: self.form.value(LLM_API_TOKEN).to_owned(),
            llm_source_url: self.form.value(LLM_SOURCE_URL).to_owned(),
            model: self.form.value(MODEL).to_owned(),
            name: self.form.value(NAME).to_owned(),
            temperature: (!temperature.is_empty()).then(|| temperature.parse().unwrap_or(f64::NAN)),
            instruction: self.form.value(INSTRUCTION).to_owned(),
            prompt: self.form.value(PROMPT).to_owned(),
        }
    }

    pub async fn submit(&mut self, repo: &ConfigRepository) -> Notification {
        if !self.form.is_valid() {
            self.form.mark_all_touched();
            return Notification::error(INVALID);
        }
        self.saving = true;
        let result = repo.save(self.configuration()).await;
        self.saving = false;
        match result {
            Ok(_) => Notification::success(SAVED),
            Err(e) => Notification::error(format!("Failed to save configuration: {e}")),
        }
    }

    /// Clear every field; temperature returns to its default.
    pub fn reset(&mut self) -> Notification {
        self.form.reset();
        Notification::info(RESET)
    }

    pub fn toggle_visibility(&mut self, field: SecretField) {
        match field {
            SecretField::GithubToken => self.hide_github_token = !self.hide_github_token,
            SecretField::LlmApiToken => self.hide_llm_api_token = !self.hide_llm_api_token,
        }
    }

    pub fn is_hidden(&self, field: SecretField) -> bool {
        match field {
            SecretField::GithubToken => self.hide_github_token,
            SecretField::LlmApiToken => self.hide_llm_api_token,
        }
    }

    /// HTML input type for a secret field.
    pub fn input_type(&self, field: SecretField) -> &'static str {
        if self.is_hidden(field) { "password" } else { "text" }
    }

    /// Material icon for the toggle button.
    pub fn visibility_icon(&self, field: SecretField) -> &'static str {
        if self.is_hidden(field) { "visibility" } else { "visibility_off" }
    }
}
