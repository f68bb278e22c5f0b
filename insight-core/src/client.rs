use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openrouter;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{InsightError, Result};

/// A text-generation endpoint: model identifier and prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}

/// [`TextGenerator`] backed by OpenRouter through `rig`.
///
/// Build one at startup and share it; the underlying HTTP client is reused
/// across calls.
pub struct OpenRouterGenerator {
    client: openrouter::Client,
}

impl OpenRouterGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            client: openrouter::Client::new(&config.api_key),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenRouterGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        let agent = self.client.agent(model).build();

        let response = agent
            .prompt(prompt.to_string())
            .await
            .map_err(|e| InsightError::Generation(e.to_string()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis() as u64,
            response_length = response.len(),
            "Completion received"
        );
        Ok(response)
    }
}
