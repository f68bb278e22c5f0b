use thiserror::Error;

pub const AUTH_ERROR_MESSAGE: &str = "Invalid API key. Please check your configuration.";
pub const RATE_LIMIT_MESSAGE: &str = "API quota exceeded. Please try again later.";
pub const OVERLOADED_MESSAGE: &str =
    "The AI service is temporarily overloaded. Please try again in a moment.";
pub const CONTENT_BLOCKED_MESSAGE: &str =
    "The request was blocked by content safety filters. Please try a different title.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Errors produced while generating insights
#[derive(Debug, Error)]
pub enum InsightError {
    /// Missing or blank credential, or otherwise unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Title is required")]
    MissingTitle,

    /// Failure reported by the text-generation provider
    #[error("{0}")]
    Generation(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("No valid facts extracted")]
    NoValidFacts,

    #[error("Invalid suggestion format")]
    InvalidSuggestionFormat,

    #[error("Invalid suggestion type: {0}")]
    InvalidSuggestionType(String),
}

impl InsightError {
    /// Message suitable for showing to an end user.
    ///
    /// Provider failures go through [`normalize_error`]; everything else is
    /// already phrased for the caller.
    pub fn user_message(&self) -> String {
        match self {
            InsightError::Generation(message) => normalize_error(message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;

/// Map a raw provider error message onto a short user-facing message.
///
/// Matching is case-insensitive and the first matching category wins.
/// Unrecognised messages are returned unchanged; a blank message becomes
/// [`UNKNOWN_ERROR_MESSAGE`].
pub fn normalize_error(message: &str) -> String {
    if message.trim().is_empty() {
        return UNKNOWN_ERROR_MESSAGE.to_string();
    }

    let lower = message.to_lowercase();
    let matches_any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if matches_any(&["api key", "authentication"]) {
        AUTH_ERROR_MESSAGE.to_string()
    } else if matches_any(&["quota", "rate limit"]) {
        RATE_LIMIT_MESSAGE.to_string()
    } else if matches_any(&["overloaded", "unavailable"]) {
        OVERLOADED_MESSAGE.to_string()
    } else if matches_any(&["blocked", "safety"]) {
        CONTENT_BLOCKED_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}
