use crate::error::{InsightError, Result};
use crate::parser::ParseMode;
use crate::retry::RetryPolicy;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_VAR: &str = "INSIGHT_MODEL";
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";

/// Credential and model used to reach the text-generation endpoint
#[derive(Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(InsightError::Config(format!("{API_KEY_VAR} is blank")));
        }
        let model = model.into();
        if model.trim().is_empty() {
            return Err(InsightError::Config("model identifier is blank".to_string()));
        }
        Ok(Self { api_key, model })
    }

    /// Read the credential (required) and model (optional) from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| InsightError::Config(format!("{API_KEY_VAR} not set")))?;
        let model = std::env::var(MODEL_VAR)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }
}

/// Per-operation retry and parsing behaviour.
///
/// The facts path retries and tolerates non-JSON replies; the suggestion path
/// makes a single attempt and only accepts a clean JSON object. Suggestion
/// latency stays bounded that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightPolicy {
    pub facts_retry: RetryPolicy,
    pub suggestion_retry: RetryPolicy,
    pub facts_parsing: ParseMode,
    pub suggestion_parsing: ParseMode,
}

impl Default for InsightPolicy {
    fn default() -> Self {
        Self {
            facts_retry: RetryPolicy::default(),
            suggestion_retry: RetryPolicy::none(),
            facts_parsing: ParseMode::Lenient,
            suggestion_parsing: ParseMode::Strict,
        }
    }
}
