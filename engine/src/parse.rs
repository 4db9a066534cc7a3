use crate::error::LoadError;
use crate::log;
use crate::types::{EpisodeLinks, Record};
use serde_json::{Map, Value};

/// Platforms read from the flat `episode_<platform>_url` keys, in link order
const FLAT_LINK_KEYS: &[(&str, &str)] = &[
    ("apple", "episode_apple_url"),
    ("spotify", "episode_spotify_url"),
];

/// Normalize a search term for case-insensitive substring matching
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase()
}

/// Parse the site data document into records.
///
/// The document itself must be a JSON array. Individual records are read
/// leniently: a field with a missing or unexpected value is treated as
/// absent, and elements that are not objects are skipped.
pub fn parse_records(json: &str) -> Result<Vec<Record>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(LoadError::NotAnArray(json_kind(&other))),
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::Object(obj) => records.push(record_from_object(obj)),
            other => log::warn(&format!(
                "Skipping site data entry {} (expected object, found {})",
                i,
                json_kind(other)
            )),
        }
    }
    Ok(records)
}

/// Read one record, field by field
pub fn record_from_object(obj: &Map<String, Value>) -> Record {
    Record {
        id: string_field(obj, "unique_vorschlag_id"),
        suggestion_text: string_field(obj, "vorschlag"),
        proposer_name: string_field(obj, "vorschlagender"),
        is_listener: bool_field(obj, "ist_hoerer"),
        listener_name: string_field(obj, "hoerer_name"),
        point_awarded: bool_field(obj, "punkt_erhalten"),
        awarded_by: string_field(obj, "punkt_von"),
        rationale: string_field(obj, "begruendung"),
        tags: tags_field(obj),
        discussion_start_seconds: obj
            .get("start_zeit_sekunden")
            .and_then(parse_seconds)
            .or_else(|| obj.get("start_zeit").and_then(parse_seconds)),
        episode_title: string_field(obj, "episode_title"),
        episode_date: string_field(obj, "episode_date"),
        episode_links: links_field(obj),
    }
}

/// Parse a start time given as seconds (`125`, `"125"` or `"125s"`)
pub fn parse_seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let s = s.trim();
            s.strip_suffix('s').unwrap_or(s).trim().parse().ok()
        }
        _ => None,
    }
}

fn non_empty(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    non_empty(obj.get(key)).map(str::to_string)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn tags_field(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("tags") {
        Some(Value::Array(tags)) => tags
            .iter()
            .filter_map(|tag| non_empty(Some(tag)))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn links_field(obj: &Map<String, Value>) -> EpisodeLinks {
    // An explicit link map takes precedence over the flat per-platform keys
    if let Some(Value::Object(links)) = obj.get("episode_links") {
        return links
            .iter()
            .filter_map(|(platform, url)| {
                non_empty(Some(url)).map(|url| (platform.clone(), url.to_string()))
            })
            .collect();
    }

    FLAT_LINK_KEYS
        .iter()
        .filter_map(|(platform, key)| {
            non_empty(obj.get(*key)).map(|url| (platform.to_string(), url.to_string()))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
