use serde::{Deserialize, Serialize};

use crate::error::InsightError;

/// Anything in the metadata feed that only carries a display name
/// (genres, production companies, creators, networks).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedEntry {
    #[serde(default)]
    pub name: String,
}

/// Movie or series metadata as delivered by the metadata source.
///
/// Series records carry `name`/`first_air_date`, movies carry
/// `title`/`release_date`. Convert into a [`MediaRecord`] before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieData {
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub original_language: Option<String>,
    #[serde(default)]
    pub genres: Vec<NamedEntry>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub production_companies: Vec<NamedEntry>,
    #[serde(default)]
    pub created_by: Vec<NamedEntry>,
    #[serde(default)]
    pub networks: Vec<NamedEntry>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub original_language: Option<String>,
    pub genres: Vec<String>,
    pub runtime: Option<u32>,
    pub production_companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDetails {
    pub name: String,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub original_language: Option<String>,
    pub genres: Vec<String>,
    pub runtime: Option<u32>,
    pub production_companies: Vec<String>,
    pub created_by: Vec<String>,
    pub networks: Vec<String>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
}

/// A movie or a series, decided once when the input is accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRecord {
    Movie(MovieDetails),
    Series(SeriesDetails),
}

impl MediaRecord {
    pub fn title(&self) -> &str {
        match self {
            MediaRecord::Movie(movie) => &movie.title,
            MediaRecord::Series(series) => &series.name,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            MediaRecord::Movie(_) => "Movie",
            MediaRecord::Series(_) => "TV Series",
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn names(entries: &[NamedEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.name.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

impl TryFrom<&MovieData> for MediaRecord {
    type Error = InsightError;

    fn try_from(data: &MovieData) -> Result<Self, Self::Error> {
        if let Some(name) = non_blank(&data.name) {
            return Ok(MediaRecord::Series(SeriesDetails {
                name,
                first_air_date: non_blank(&data.first_air_date),
                overview: non_blank(&data.overview),
                original_language: non_blank(&data.original_language),
                genres: names(&data.genres),
                runtime: data
                    .runtime
                    .or_else(|| data.episode_run_time.first().copied()),
                production_companies: names(&data.production_companies),
                created_by: names(&data.created_by),
                networks: names(&data.networks),
                number_of_seasons: data.number_of_seasons,
                number_of_episodes: data.number_of_episodes,
            }));
        }

        let title = non_blank(&data.title).ok_or(InsightError::MissingTitle)?;
        Ok(MediaRecord::Movie(MovieDetails {
            title,
            release_date: non_blank(&data.release_date),
            overview: non_blank(&data.overview),
            original_language: non_blank(&data.original_language),
            genres: names(&data.genres),
            runtime: data.runtime,
            production_companies: names(&data.production_companies),
        }))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Series,
}

impl MediaType {
    /// Exact, case-sensitive match against the two accepted values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(MediaType::Movie),
            "series" => Some(MediaType::Series),
            _ => None,
        }
    }
}

/// A single recommended title returned by the suggestion path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub year: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub overview: String,
    pub reason: String,
    #[serde(rename = "searchKeyword")]
    pub search_keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsResult {
    pub facts: Vec<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FactsResult {
    pub fn ok(facts: Vec<String>) -> Self {
        Self {
            facts,
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            facts: Vec::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub suggestion: Suggestion,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SuggestionResult {
    pub fn ok(suggestion: Suggestion) -> Self {
        Self {
            suggestion,
            success: true,
            error: None,
        }
    }

    /// Failure with a placeholder suggestion; callers must check `success`.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            suggestion: Suggestion::default(),
            success: false,
            error: Some(error.into()),
        }
    }
}
