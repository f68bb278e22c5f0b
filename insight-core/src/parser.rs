use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{InsightError, Result};
use crate::models::{MediaType, Suggestion};
use crate::prompts::FACTS_PER_TITLE;

/// Shortest fact accepted from a JSON reply.
const MIN_FACT_CHARS: usize = 10;
/// Shortest line accepted by the line-based fallback.
const MIN_LINE_CHARS: usize = 20;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^```(?:json)?").expect("Invalid regex"));
static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```$").expect("Invalid regex"));
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+[.)]|[-*•–—])\s*").expect("Invalid regex"));

/// How forgiving a parser is when the model does not return clean JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Only a well-formed JSON payload is accepted.
    Strict,
    /// Fall back to heuristics when the JSON payload is unusable.
    Lenient,
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = match OPENING_FENCE.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    };
    let without_open = without_open.trim();
    let without_close = match CLOSING_FENCE.find(without_open) {
        Some(m) => &without_open[..m.start()],
        None => without_open,
    };
    without_close.trim()
}

/// Extract up to ten facts from a model reply.
///
/// A JSON array of strings is preferred. In [`ParseMode::Lenient`] anything
/// else is read line by line instead. An empty result means nothing usable
/// was found.
pub fn parse_facts(text: &str, mode: ParseMode) -> Vec<String> {
    let cleaned = strip_code_fence(text);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Array(items)) => {
            return items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|fact| fact.chars().count() > MIN_FACT_CHARS)
                .take(FACTS_PER_TITLE)
                .map(str::to_string)
                .collect();
        }
        Ok(other) => debug!(kind = json_kind(&other), "Facts reply was JSON but not an array"),
        Err(e) => debug!(error = %e, "Facts reply is not valid JSON"),
    }

    match mode {
        ParseMode::Strict => Vec::new(),
        ParseMode::Lenient => facts_from_lines(cleaned),
    }
}

fn facts_from_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .filter(|line| !line.starts_with('{') && !line.starts_with('['))
        .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
        .filter(|fact| fact.chars().count() > MIN_FACT_CHARS)
        .take(FACTS_PER_TITLE)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse and validate the suggestion object.
///
/// Malformed JSON is a hard failure in [`ParseMode::Strict`]. In
/// [`ParseMode::Lenient`] the outermost `{ ... }` span is tried as well.
pub fn parse_suggestion(text: &str, mode: ParseMode) -> Result<Suggestion> {
    let cleaned = strip_code_fence(text);

    let object = match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!(kind = json_kind(&other), "Suggestion reply is not an object");
            return Err(InsightError::InvalidSuggestionFormat);
        }
        Err(e) => {
            debug!(error = %e, "Suggestion reply is not valid JSON");
            match mode {
                ParseMode::Strict => return Err(InsightError::InvalidSuggestionFormat),
                ParseMode::Lenient => embedded_object(cleaned)
                    .ok_or(InsightError::InvalidSuggestionFormat)?,
            }
        }
    };

    let title = required_text(&object, "title")?;
    let year = required_year(&object)?;
    let kind = required_text(&object, "type")?;
    let overview = required_text(&object, "overview")?;
    let reason = required_text(&object, "reason")?;
    let search_keyword = required_text(&object, "searchKeyword")?;

    let media_type =
        MediaType::parse(&kind).ok_or(InsightError::InvalidSuggestionType(kind))?;

    Ok(Suggestion {
        title,
        year,
        media_type,
        overview,
        reason,
        search_keyword,
    })
}

fn embedded_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn required_text(object: &Map<String, Value>, field: &str) -> Result<String> {
    match object.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => {
            debug!(field = field, "Suggestion field missing or empty");
            Err(InsightError::InvalidSuggestionFormat)
        }
    }
}

fn required_year(object: &Map<String, Value>) -> Result<String> {
    match object.get("year") {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => Ok(year_text(n)),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => {
            debug!(field = "year", "Suggestion field missing or empty");
            Err(InsightError::InvalidSuggestionFormat)
        }
    }
}

/// Whole numbers render without a fractional part (`2020.0` -> `2020`).
fn year_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            (v as i64).to_string()
        }
        _ => n.to_string(),
    }
}
