use std::sync::Arc;

use tracing::{error, info};

use crate::client::TextGenerator;
use crate::config::InsightPolicy;
use crate::error::{InsightError, Result};
use crate::models::{FactsResult, MediaRecord, MovieData, SuggestionResult};
use crate::parser::{parse_facts, parse_suggestion};
use crate::prompts::{build_facts_prompt, build_suggestion_prompt};
use crate::retry::RetryPolicy;

/// Builds prompts, calls the text-generation endpoint and turns the replies
/// into [`FactsResult`] / [`SuggestionResult`].
///
/// Both operations always resolve; failures are reported through the
/// result's `success` and `error` fields.
#[derive(Clone)]
pub struct InsightGenerator {
    generator: Arc<dyn TextGenerator>,
    model: String,
    policy: InsightPolicy,
}

impl InsightGenerator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        model: impl Into<String>,
        policy: InsightPolicy,
    ) -> Self {
        Self {
            generator,
            model: model.into(),
            policy,
        }
    }

    pub fn policy(&self) -> &InsightPolicy {
        &self.policy
    }

    /// Ten lesser-known facts about a movie or series.
    pub async fn generate_facts(&self, data: &MovieData) -> FactsResult {
        match self.try_generate_facts(data).await {
            Ok(facts) => FactsResult::ok(facts),
            Err(e) => {
                let message = e.user_message();
                error!(
                    title = data.title.as_deref().or(data.name.as_deref()).unwrap_or(""),
                    error = %e,
                    user_message = %message,
                    "Failed to generate facts"
                );
                FactsResult::failure(message)
            }
        }
    }

    async fn try_generate_facts(&self, data: &MovieData) -> Result<Vec<String>> {
        let record = MediaRecord::try_from(data)?;
        info!(
            title = %record.title(),
            kind = record.kind_label(),
            "Generating facts"
        );

        let prompt = build_facts_prompt(&record);
        let text = self.request(&prompt, self.policy.facts_retry).await?;

        let facts = parse_facts(&text, self.policy.facts_parsing);
        if facts.is_empty() {
            return Err(InsightError::NoValidFacts);
        }

        info!(title = %record.title(), facts = facts.len(), "Facts generated");
        Ok(facts)
    }

    /// One underrated movie or series recommendation.
    pub async fn generate_suggestion(&self) -> SuggestionResult {
        match self.try_generate_suggestion().await {
            Ok(result) => result,
            Err(e) => {
                let message = e.user_message();
                error!(error = %e, user_message = %message, "Failed to generate suggestion");
                SuggestionResult::failure(message)
            }
        }
    }

    async fn try_generate_suggestion(&self) -> Result<SuggestionResult> {
        info!("Generating suggestion");
        let prompt = build_suggestion_prompt();
        let text = self.request(&prompt, self.policy.suggestion_retry).await?;

        let suggestion = parse_suggestion(&text, self.policy.suggestion_parsing)?;
        info!(
            title = %suggestion.title,
            year = %suggestion.year,
            media_type = ?suggestion.media_type,
            "Suggestion generated"
        );
        Ok(SuggestionResult::ok(suggestion))
    }

    async fn request(&self, prompt: &str, retry: RetryPolicy) -> Result<String> {
        retry
            .retry(|| async {
                let text = self.generator.generate(&self.model, prompt).await?;
                if text.trim().is_empty() {
                    return Err(InsightError::EmptyResponse);
                }
                Ok(text)
            })
            .await
    }
}
