use std::sync::Arc;
use wasm_bindgen::prelude::*;

pub mod build;
pub mod error;
#[cfg(feature = "native")]
pub mod fetch;
pub mod log;
pub mod parse;
pub mod query;
pub mod rank;
pub mod stats;
pub mod types;

use crate::types::{EngineConfig, FacetIndex, QueryCriteria, Record, StatsSnapshot, View};

/// An immutable loaded collection together with its facet index.
///
/// Reloading builds a new snapshot; an existing one is never modified, and
/// clones share the same records.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Arc<[Record]>,
    facets: FacetIndex,
}

impl Snapshot {
    /// Create a snapshot from parsed records, building the facet index once
    pub fn new(records: Vec<Record>) -> Self {
        let facets = build::build_facets(&records);
        Snapshot {
            records: records.into(),
            facets,
        }
    }

    /// Parse the site data document; an unreadable document gives an empty snapshot
    pub fn from_json(json: &str) -> Self {
        match parse::parse_records(json) {
            Ok(records) => {
                log::info(&format!("Loaded {} suggestions", records.len()));
                Snapshot::new(records)
            }
            Err(e) => {
                log::error(&format!("Failed to load site data: {}", e));
                Snapshot::default()
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run the query and aggregate the matches
    pub fn apply(&self, criteria: &QueryCriteria) -> View<'_> {
        self.apply_with_limit(criteria, stats::TOP_TAG_LIMIT)
    }

    /// [`Snapshot::apply`] with a custom bound on the tag ranking
    pub fn apply_with_limit(&self, criteria: &QueryCriteria, tag_limit: usize) -> View<'_> {
        let start_total = log::now_ms();

        let records = query::query(self.records.iter(), criteria);
        let query_time = log::now_ms() - start_total;

        let start_stats = log::now_ms();
        let stats = stats::aggregate_with_limit(records.iter().copied(), tag_limit);
        let stats_time = log::now_ms() - start_stats;

        log::info(&format!(
            "[perf] term='{}' matched={}/{} | query={:.1}ms stats={:.1}ms | total={:.1}ms",
            criteria.search_term,
            records.len(),
            self.records.len(),
            query_time,
            stats_time,
            log::now_ms() - start_total
        ));

        View { records, stats }
    }

    /// Statistics over the whole collection
    pub fn stats(&self, tag_limit: usize) -> StatsSnapshot {
        stats::aggregate_with_limit(self.records.iter(), tag_limit)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::new(Vec::new())
    }
}

/// Forward panics to the browser console when built with `console-panic`
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();
}

/// Browser handle over one loaded snapshot.
///
/// Results are returned as JSON strings for the view layer.
#[wasm_bindgen]
pub struct SuggestionBrowser {
    snapshot: Snapshot,
    config: EngineConfig,
}

#[wasm_bindgen]
impl SuggestionBrowser {
    /// Load the site data document with the given config.
    /// data_json: JSON array of suggestion records (invalid data loads as empty)
    /// config_json: JSON EngineConfig, or "" for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(data_json: &str, config_json: &str) -> Result<SuggestionBrowser, JsError> {
        let config = EngineConfig::from_json(config_json)
            .map_err(|e| JsError::new(&e.to_string()))?;

        Ok(SuggestionBrowser {
            snapshot: Snapshot::from_json(data_json),
            config,
        })
    }

    /// Number of loaded records
    pub fn record_count(&self) -> usize {
        self.snapshot.len()
    }

    /// True when nothing was loaded, so the page shows its "no data" state
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Configured location of the site data document
    pub fn data_url(&self) -> String {
        self.config.data_url.clone()
    }

    /// Facet values for the proposer and tag selects
    pub fn facets_json(&self) -> String {
        serde_json::to_string(self.snapshot.facets()).unwrap_or_else(|_| "{}".to_string())
    }

    /// All records in load order
    pub fn records_json(&self) -> String {
        serde_json::to_string(self.snapshot.records()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Statistics over the whole collection
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.snapshot.stats(self.config.top_tags))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Filter by the current control values and return `{records, stats}`.
    /// An empty or missing proposer/tag selects all values
    pub fn search(&self, term: &str, proposer: Option<String>, tag: Option<String>) -> String {
        let criteria = QueryCriteria::from_controls(term, proposer, tag);
        let view = self.snapshot.apply_with_limit(&criteria, self.config.top_tags);
        serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
    }
}

impl SuggestionBrowser {
    /// Wrap an already built snapshot
    pub fn with_snapshot(snapshot: Snapshot, config: EngineConfig) -> Self {
        SuggestionBrowser { snapshot, config }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn site_data() -> String {
        json!([
            {
                "unique_vorschlag_id": "ep1_0",
                "vorschlag": "Bürgerrat für Klimafragen",
                "vorschlagender": "Alice",
                "punkt_erhalten": true,
                "punkt_von": "Bob",
                "tags": ["Klima", "Demokratie"],
                "episode_title": "Folge 1"
            },
            {
                "unique_vorschlag_id": "ep1_1",
                "vorschlag": "Kostenloser Nahverkehr",
                "vorschlagender": "Alice",
                "punkt_erhalten": false,
                "tags": ["Klima"],
                "episode_title": "Folge 1"
            },
            {
                "unique_vorschlag_id": "ep2_0",
                "vorschlag": "Wahlalter 16",
                "vorschlagender": "Bob",
                "punkt_erhalten": true,
                "begruendung": "Mehr Demokratie wagen",
                "tags": ["Demokratie"],
                "episode_title": "Folge 2"
            }
        ])
        .to_string()
    }

    #[test]
    fn test_snapshot_builds_facets() {
        let snapshot = Snapshot::from_json(&site_data());
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.facets().proposers, vec!["Alice", "Bob"]);
        assert_eq!(snapshot.facets().tags, vec!["Demokratie", "Klima"]);
    }

    #[test]
    fn test_invalid_data_loads_empty() {
        let snapshot = Snapshot::from_json("<!doctype html>");
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.facets(), &FacetIndex::default());

        let view = snapshot.apply(&QueryCriteria::default());
        assert!(view.records.is_empty());
        assert_eq!(view.stats, StatsSnapshot::default());
    }

    #[test]
    fn test_apply_keeps_stats_consistent_with_results() {
        let snapshot = Snapshot::from_json(&site_data());
        let criteria =
            QueryCriteria::from_controls("demokratie", None, Some("Demokratie".to_string()));
        let view = snapshot.apply(&criteria);

        let ids: Vec<&str> = view.records.iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec!["ep1_0", "ep2_0"]);
        assert_eq!(view.stats.total_count, 2);
        assert_eq!(view.stats.per_proposer.len(), 2);
        assert_eq!(view.stats.top_tags[0].tag, "Demokratie");
    }

    #[test]
    fn test_clones_share_records() {
        let snapshot = Snapshot::from_json(&site_data());
        let clone = snapshot.clone();
        assert!(std::ptr::eq(snapshot.records(), clone.records()));
    }

    #[test]
    fn test_browser_search() {
        let browser = SuggestionBrowser::new(&site_data(), "").unwrap();
        assert_eq!(browser.record_count(), 3);
        assert!(!browser.is_empty());
        assert_eq!(browser.data_url(), "site_data.json");

        let view: Value =
            serde_json::from_str(&browser.search("", Some("Alice".to_string()), None)).unwrap();
        assert_eq!(view["records"].as_array().unwrap().len(), 2);
        assert_eq!(view["records"][0]["vorschlag"], "Bürgerrat für Klimafragen");
        assert_eq!(view["stats"]["total_count"], 2);
        assert_eq!(view["stats"]["per_proposer"][0]["success_rate"], 50.0);

        // Empty select values mean "any"
        let all: Value =
            serde_json::from_str(&browser.search("", Some(String::new()), Some(String::new())))
                .unwrap();
        assert_eq!(all["records"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_browser_json_outputs() {
        let browser = SuggestionBrowser::new(&site_data(), r#"{"top_tags": 1}"#).unwrap();

        let facets: FacetIndex = serde_json::from_str(&browser.facets_json()).unwrap();
        assert_eq!(facets.proposers, vec!["Alice", "Bob"]);

        let stats: StatsSnapshot = serde_json::from_str(&browser.stats_json()).unwrap();
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.top_tags.len(), 1);
        assert_eq!(stats.top_tags[0].tag, "Klima");

        let records: Value = serde_json::from_str(&browser.records_json()).unwrap();
        assert_eq!(records.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_browser_with_snapshot() {
        let browser =
            SuggestionBrowser::with_snapshot(Snapshot::default(), EngineConfig::default());
        assert!(browser.is_empty());
        assert_eq!(browser.snapshot().len(), 0);
        let view: Value = serde_json::from_str(&browser.search("x", None, None)).unwrap();
        assert_eq!(view["stats"]["total_count"], 0);
    }
}
