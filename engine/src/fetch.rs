//! Native loading of the site data document from a URL or a local file.

use crate::error::FetchError;
use crate::log;
use crate::parse::parse_records;
use crate::types::{EngineConfig, Record};
use crate::Snapshot;

/// Read the site data document from an `http(s)://` URL or a file path
pub fn fetch_records(location: &str) -> Result<Vec<Record>, FetchError> {
    let start = log::now_ms();

    let body = if location.starts_with("http://") || location.starts_with("https://") {
        reqwest::blocking::get(location)?
            .error_for_status()?
            .text()?
    } else {
        std::fs::read_to_string(location).map_err(|source| FetchError::Io {
            path: location.to_string(),
            source,
        })?
    };
    let records = parse_records(&body)?;

    log::info(&format!(
        "[perf] loaded {} records from '{}' in {:.1}ms",
        records.len(),
        location,
        log::now_ms() - start
    ));
    Ok(records)
}

/// [`fetch_records`], substituting an empty collection on any failure
pub fn load_or_empty(location: &str) -> Vec<Record> {
    fetch_records(location).unwrap_or_else(|e| {
        log::error(&format!("Failed to load site data from '{}': {}", location, e));
        Vec::new()
    })
}

/// Load the configured `data_url` into a snapshot, empty on failure
pub fn load_snapshot(config: &EngineConfig) -> Snapshot {
    Snapshot::new(load_or_empty(&config.data_url))
}
