use chrono::{DateTime, Datelike, NaiveDate};

use crate::models::MediaRecord;

pub const FACTS_PER_TITLE: usize = 10;

const SUGGESTION_PROMPT: &str = r#"You are a film and television expert who loves surfacing hidden gems.

Recommend ONE underrated movie or TV series that deserves more attention. Prefer well-reviewed titles that most casual viewers have never heard of, from any decade or country.

Respond with ONLY this JSON object and nothing else:
{
  "title": "exact title",
  "year": "release year",
  "type": "movie" or "series",
  "overview": "two or three sentence synopsis without spoilers",
  "reason": "one or two sentences on why it is worth watching",
  "searchKeyword": "the search term that best finds this title in a movie database"
}

The "type" field must be exactly "movie" or "series"."#;

/// Calendar year of a release/air date, or `Unknown` when absent or unparseable.
pub fn display_year(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return "Unknown".to_string();
    };

    let year = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.year())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|d| d.year()))
        .ok()
        .or_else(|| {
            (raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()))
                .then(|| raw.parse::<i32>().ok())
                .flatten()
        });

    year.map(|y| y.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

/// Render the instruction asking for ten facts about a movie or series.
///
/// Output depends only on the record, so identical input always produces an
/// identical prompt.
pub fn build_facts_prompt(record: &MediaRecord) -> String {
    let (date, overview, language, genres, runtime, companies) = match record {
        MediaRecord::Movie(m) => (
            m.release_date.as_deref(),
            m.overview.as_deref(),
            m.original_language.as_deref(),
            &m.genres,
            m.runtime,
            &m.production_companies,
        ),
        MediaRecord::Series(s) => (
            s.first_air_date.as_deref(),
            s.overview.as_deref(),
            s.original_language.as_deref(),
            &s.genres,
            s.runtime,
            &s.production_companies,
        ),
    };

    let title = record.title();
    let label = record.kind_label();
    let year = display_year(date);
    let runtime = runtime
        .map(|r| format!("{r} minutes"))
        .unwrap_or_else(|| "not specified".to_string());

    let mut details = vec![
        format!("- Title: {title}"),
        format!("- Year: {year}"),
        format!("- Type: {label}"),
        format!("- Overview: {}", overview.unwrap_or("Not available")),
        format!("- Original language: {}", language.unwrap_or("en")),
        format!("- Genres: {}", join_or(genres, "various")),
        format!("- Runtime: {runtime}"),
    ];

    if !companies.is_empty() {
        details.push(format!("- Production companies: {}", companies.join(", ")));
    }

    if let MediaRecord::Series(s) = record {
        if !s.created_by.is_empty() {
            details.push(format!("- Created by: {}", s.created_by.join(", ")));
        }
        if !s.networks.is_empty() {
            details.push(format!("- Networks: {}", s.networks.join(", ")));
        }
        if let Some(seasons) = s.number_of_seasons {
            details.push(format!("- Number of seasons: {seasons}"));
        }
        if let Some(episodes) = s.number_of_episodes {
            details.push(format!("- Number of episodes: {episodes}"));
        }
    }

    format!(
        r#"You are a film and television expert. Share {count} interesting, lesser-known facts about the {label} "{title}" ({year}).

{details}

Focus on behind-the-scenes stories, production challenges, casting decisions, filming locations, cultural impact and trivia that even fans might not know. Every fact must be accurate and specific to this {label}.

Return EXACTLY {count} facts as a JSON array of strings, for example:
["First fact.", "Second fact."]

Return only the JSON array and nothing else: no numbering, no markdown, no commentary."#,
        count = FACTS_PER_TITLE,
        details = details.join("\n"),
    )
}

/// Render the fixed instruction asking for one underrated title.
pub fn build_suggestion_prompt() -> String {
    SUGGESTION_PROMPT.to_string()
}
