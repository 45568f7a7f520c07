//! Project configuration record and its repository.
//!
//! SYSTEM CONTEXT
//! ==============
//! One configuration per client profile, stored as a single JSON record under
//! `project_configuration`. The project-setup form loads it, edits it, and
//! saves it back through `ConfigRepository`.
//!
//! DESIGN
//! ======
//! Validation runs every rule and reports all violations at once. Loads and
//! saves are followed by a simulated processing delay so the UI exercises its
//! loading states against the local store; the delay can be disabled.

#[cfg(test)]
#[path = "project_config_test.rs"]
mod project_config_test;

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;
use crate::util::delay::sleep;

pub const STORAGE_KEY: &str = "project_configuration";
pub const INSTRUCTION_LIMIT: usize = 8000;
pub const PROMPT_LIMIT: usize = 10_000;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Selectable temperatures, 0.0 through 1.0 in tenths.
pub const TEMPERATURE_OPTIONS: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

const MOCK_INSTRUCTION: &str = "Please review the following code for potential issues, best practices violations, \
and improvement suggestions. Focus on code quality, security, performance, and maintainability.";
const MOCK_PROMPT: &str = "Analyze this code repository and provide a comprehensive review covering:\n\
1. Code quality and style\n\
2. Security vulnerabilities\n\
3. Performance optimizations\n\
4. Best practices adherence\n\
5. Suggestions for improvement";

/// Settings for one code-review integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    pub github_token: String,
    pub llm_api_token: String,
    pub llm_source_url: String,
    pub model: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub prompt: String,
}

impl Default for ProjectConfiguration {
    fn default() -> Self {
        Self {
            github_token: String::new(),
            llm_api_token: String::new(),
            llm_source_url: String::new(),
            model: String::new(),
            name: String::new(),
            temperature: Some(DEFAULT_TEMPERATURE),
            instruction: String::new(),
            prompt: String::new(),
        }
    }
}

impl ProjectConfiguration {
    /// Built-in configuration served when nothing is stored yet.
    pub fn mock() -> Self {
        Self {
            github_token: "ghp_mock_token_1234567890abcdef".to_owned(),
            llm_api_token: "sk-mock_llm_api_token_1234567890".to_owned(),
            llm_source_url: "https://api.openai.com/v1".to_owned(),
            model: "gpt-4".to_owned(),
            name: "AI Review Project".to_owned(),
            temperature: Some(DEFAULT_TEMPERATURE),
            instruction: MOCK_INSTRUCTION.to_owned(),
            prompt: MOCK_PROMPT.to_owned(),
        }
    }

    /// Copy with both tokens masked, for display and logs.
    pub fn redacted(&self) -> Self {
        Self { github_token: mask(&self.github_token), llm_api_token: mask(&self.llm_api_token), ..self.clone() }
    }

    /// Check every rule.
    ///
    /// # Errors
    ///
    /// Returns all violated rules, in field order.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        let required = [
            (&self.github_token, "GitHub token is required"),
            (&self.llm_api_token, "LLM API token is required"),
            (&self.llm_source_url, "LLM source URL is required"),
            (&self.model, "Model is required"),
            (&self.name, "Project name is required"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                errors.push(message.to_owned());
            }
        }
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                errors.push("Temperature must be between 0 and 1".to_owned());
            }
        }
        if self.instruction.chars().count() > INSTRUCTION_LIMIT {
            errors.push(format!("Instruction must be less than {INSTRUCTION_LIMIT} characters"));
        }
        if self.prompt.chars().count() > PROMPT_LIMIT {
            errors.push(format!("Prompt must be less than {PROMPT_LIMIT} characters"));
        }
        if errors.is_empty() { Ok(()) } else { Err(ValidationErrors(errors)) }
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 { "*".repeat(secret.chars().count()) } else { format!("{visible}****") }
}

/// Every rule a configuration broke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("stored configuration could not be read: {0}")]
    Load(String),
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("configuration could not be saved: {0}")]
    Save(String),
    #[error("configuration could not be cleared: {0}")]
    Clear(String),
}

/// Delays applied after each repository operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub stored_load: Duration,
    pub default_load: Duration,
    pub save: Duration,
    pub clear: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            stored_load: Duration::from_millis(300),
            default_load: Duration::from_millis(500),
            save: Duration::from_millis(400),
            clear: Duration::from_millis(100),
        }
    }
}

impl SimulatedLatency {
    pub fn none() -> Self {
        Self {
            stored_load: Duration::ZERO,
            default_load: Duration::ZERO,
            save: Duration::ZERO,
            clear: Duration::ZERO,
        }
    }
}

#[derive(Clone)]
pub struct ConfigRepository {
    store: Rc<dyn KeyValueStore>,
    latency: SimulatedLatency,
}

impl ConfigRepository {
    pub fn new(store: Rc<dyn KeyValueStore>, latency: SimulatedLatency) -> Self {
        Self { store, latency }
    }

    /// Stored configuration, or the built-in mock when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `Load` if the store cannot be read or the record does not parse.
    pub async fn load(&self) -> Result<ProjectConfiguration, ConfigError> {
        let raw = self.store.get(STORAGE_KEY).map_err(|e| ConfigError::Load(e.to_string()))?;
        match raw.filter(|r| !r.is_empty()) {
            Some(raw) => {
                let config: ProjectConfiguration =
                    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(e.to_string()))?;
                sleep(self.latency.stored_load).await;
                tracing::info!(name = %config.name, "configuration loaded from storage");
                Ok(config)
            }
            None => {
                sleep(self.latency.default_load).await;
                tracing::info!("no stored configuration; serving defaults");
                Ok(ProjectConfiguration::mock())
            }
        }
    }

    /// Validate and store `config`, returning what was stored.
    ///
    /// # Errors
    ///
    /// Returns `Validation` listing every violated rule, or `Save` if the
    /// store rejects the write.
    pub async fn save(&self, config: ProjectConfiguration) -> Result<ProjectConfiguration, ConfigError> {
        if let Err(errors) = config.validate() {
            tracing::warn!(errors = %errors, "configuration rejected");
            return Err(ConfigError::Validation(errors));
        }
        let raw = serde_json::to_string(&config).map_err(|e| ConfigError::Save(e.to_string()))?;
        self.store.set(STORAGE_KEY, &raw).map_err(|e| ConfigError::Save(e.to_string()))?;
        sleep(self.latency.save).await;
        tracing::info!(name = %config.name, "configuration saved");
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `Clear` if the store rejects the removal.
    pub async fn clear(&self) -> Result<(), ConfigError> {
        self.store.remove(STORAGE_KEY).map_err(|e| ConfigError::Clear(e.to_string()))?;
        sleep(self.latency.clear).await;
        tracing::info!("configuration cleared");
        Ok(())
    }
}
