use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use insight_core::{
    InsightError, InsightGenerator, InsightPolicy, MovieData, RetryPolicy, TextGenerator,
};

/// Answers facts prompts with a JSON array and suggestion prompts with an
/// object, after a short delay so concurrent calls overlap.
struct EchoGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, _model: &str, prompt: &str) -> insight_core::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;

        if prompt.contains("JSON array") {
            let title = prompt
                .split('"')
                .nth(1)
                .ok_or_else(|| InsightError::Generation("no title in prompt".into()))?;
            Ok(format!(r#"["{title} was filmed entirely at night."]"#))
        } else {
            Ok(r#"{"title":"Primer","year":2004,"type":"movie","overview":"Engineers build a box.","reason":"Dense and rewarding.","searchKeyword":"Primer"}"#.to_string())
        }
    }
}

/// Fails every call with the same provider error.
struct FailingGenerator {
    message: &'static str,
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> insight_core::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(InsightError::Generation(self.message.to_string()))
    }
}

fn movie(title: &str) -> MovieData {
    MovieData {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_calls_are_independent() -> anyhow::Result<()> {
    let generator = Arc::new(EchoGenerator {
        calls: AtomicUsize::new(0),
    });
    let insights = InsightGenerator::new(generator.clone(), "any-model", InsightPolicy::default());

    let (first, second) = (movie("Alien"), movie("Aliens"));
    let start = tokio::time::Instant::now();
    let (alien, aliens, suggestion) = tokio::join!(
        insights.generate_facts(&first),
        insights.generate_facts(&second),
        insights.generate_suggestion(),
    );

    assert!(alien.success && aliens.success && suggestion.success);
    assert_eq!(alien.facts, vec!["Alien was filmed entirely at night."]);
    assert_eq!(aliens.facts, vec!["Aliens was filmed entirely at night."]);
    assert_eq!(suggestion.suggestion.year, "2004");
    assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    // All three waited on the endpoint at the same time.
    assert!(start.elapsed() < Duration::from_millis(200));

    let body = serde_json::to_value(&suggestion)?;
    assert_eq!(body["suggestion"]["type"], "movie");
    assert_eq!(body["suggestion"]["searchKeyword"], "Primer");
    Ok(())
}

/// Facts prompts always fail with an overload error; suggestion prompts
/// succeed after a short wait.
struct OverloadedFactsGenerator {
    facts_calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for OverloadedFactsGenerator {
    async fn generate(&self, _model: &str, prompt: &str) -> insight_core::Result<String> {
        if prompt.contains("JSON array") {
            self.facts_calls.fetch_add(1, Ordering::SeqCst);
            return Err(InsightError::Generation("model overloaded".into()));
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(r#"{"title":"Primer","year":2004,"type":"movie","overview":"Engineers build a box.","reason":"Dense and rewarding.","searchKeyword":"Primer"}"#.to_string())
    }
}

#[tokio::test(start_paused = true)]
async fn backoff_does_not_block_other_calls() {
    let generator = Arc::new(OverloadedFactsGenerator {
        facts_calls: AtomicUsize::new(0),
    });
    let insights = InsightGenerator::new(generator.clone(), "any-model", InsightPolicy::default());

    let alien = movie("Alien");
    let start = tokio::time::Instant::now();
    let ((facts, facts_done), (suggestion, suggestion_done)) = tokio::join!(
        async {
            let result = insights.generate_facts(&alien).await;
            (result, tokio::time::Instant::now())
        },
        async {
            let result = insights.generate_suggestion().await;
            (result, tokio::time::Instant::now())
        },
    );

    assert!(suggestion.success);
    // Finished while the facts call was still in its first 900ms wait.
    assert!(suggestion_done - start < Duration::from_millis(900));

    assert!(!facts.success);
    assert_eq!(
        facts.error.as_deref(),
        Some(insight_core::error::OVERLOADED_MESSAGE)
    );
    assert_eq!(generator.facts_calls.load(Ordering::SeqCst), 3);
    // 900ms + 1800ms of backoff.
    assert!(facts_done - start >= Duration::from_millis(2700));
}

#[tokio::test]
async fn provider_errors_are_normalized() {
    let generator = Arc::new(FailingGenerator {
        message: "401 Unauthorized: invalid API key",
        calls: AtomicUsize::new(0),
    });
    let policy = InsightPolicy {
        facts_retry: RetryPolicy::new(1, Duration::from_millis(1)),
        ..InsightPolicy::default()
    };
    let insights = InsightGenerator::new(generator.clone(), "any-model", policy);

    let facts = insights.generate_facts(&movie("Alien")).await;
    assert!(!facts.success);
    assert_eq!(
        facts.error.as_deref(),
        Some(insight_core::error::AUTH_ERROR_MESSAGE)
    );
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);

    let suggestion = insights.generate_suggestion().await;
    assert!(!suggestion.success);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn unmatched_errors_surface_raw() {
    let generator = Arc::new(FailingGenerator {
        message: "connection reset by peer",
        calls: AtomicUsize::new(0),
    });
    let policy = InsightPolicy {
        facts_retry: RetryPolicy::none(),
        ..InsightPolicy::default()
    };
    let insights = InsightGenerator::new(generator, "any-model", policy);

    let facts = insights.generate_facts(&movie("Alien")).await;
    assert_eq!(facts.error.as_deref(), Some("connection reset by peer"));
}
