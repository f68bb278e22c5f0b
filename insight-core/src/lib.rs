//! Movie and TV insights on top of a generative text endpoint.
//!
//! [`InsightGenerator`] turns a [`MovieData`] record into a prompt, sends it
//! through a [`TextGenerator`], and parses the reply into a [`FactsResult`].
//! It can also ask for a single underrated title ([`SuggestionResult`]).

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod retry;

// Re-export commonly used types
pub use client::{OpenRouterGenerator, TextGenerator};
pub use config::{GeneratorConfig, InsightPolicy};
pub use error::{InsightError, Result, normalize_error};
pub use generator::InsightGenerator;
pub use models::{
    FactsResult, MediaRecord, MediaType, MovieData, MovieDetails, NamedEntry, SeriesDetails,
    Suggestion, SuggestionResult,
};
pub use parser::{ParseMode, parse_facts, parse_suggestion};
pub use prompts::{build_facts_prompt, build_suggestion_prompt};
pub use retry::RetryPolicy;
