use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Episode links: platform name -> URL, in the order they were read
pub type EpisodeLinks = IndexMap<String, String>;

/// One suggestion made on the podcast, enriched with its episode metadata.
///
/// Serializes with the keys of the site data document so templates written
/// against `site_data.json` can render it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "unique_vorschlag_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "vorschlag")]
    pub suggestion_text: Option<String>,
    #[serde(rename = "vorschlagender")]
    pub proposer_name: Option<String>,
    #[serde(rename = "ist_hoerer")]
    pub is_listener: bool,
    #[serde(rename = "hoerer_name")]
    pub listener_name: Option<String>,
    #[serde(rename = "punkt_erhalten")]
    pub point_awarded: bool,
    #[serde(rename = "punkt_von")]
    pub awarded_by: Option<String>,
    #[serde(rename = "begruendung")]
    pub rationale: Option<String>,
    pub tags: Vec<String>,
    #[serde(rename = "start_zeit_sekunden")]
    pub discussion_start_seconds: Option<u64>,
    pub episode_title: Option<String>,
    pub episode_date: Option<String>,
    pub episode_links: EpisodeLinks,
}

impl Record {
    /// Proposer name, treating an empty name as absent
    pub fn proposer(&self) -> Option<&str> {
        self.proposer_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Distinct facet values available for filtering, each sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetIndex {
    pub proposers: Vec<String>,
    pub tags: Vec<String>,
}

/// Selection on a single facet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum FacetFilter {
    #[default]
    Any,
    Only(String),
}

impl FacetFilter {
    /// Interpret a select control value; `None` and `""` select everything
    pub fn from_control(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => FacetFilter::Only(v),
            _ => FacetFilter::Any,
        }
    }
}

/// Active search term and facet selections for one interaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    pub search_term: String,
    pub proposer: FacetFilter,
    pub tag: FacetFilter,
}

impl QueryCriteria {
    /// Build criteria from the raw values of the search box and both selects
    pub fn from_controls(
        search_term: &str,
        proposer: Option<String>,
        tag: Option<String>,
    ) -> Self {
        QueryCriteria {
            search_term: search_term.to_string(),
            proposer: FacetFilter::from_control(proposer),
            tag: FacetFilter::from_control(tag),
        }
    }
}

/// Suggestion count and success rate of one proposer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposerStats {
    pub name: String,
    pub count: usize,
    pub awarded: usize,
    pub success_rate: f64,
}

/// Occurrence count of one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Summary statistics over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_count: usize,
    pub per_proposer: Vec<ProposerStats>,
    pub top_tags: Vec<TagCount>,
}

/// Matching records and their statistics, handed to the view layer
#[derive(Debug, Clone, Serialize)]
pub struct View<'a> {
    pub records: Vec<&'a Record>,
    pub stats: StatsSnapshot,
}

fn default_data_url() -> String {
    "site_data.json".to_string()
}

fn default_top_tags() -> usize {
    crate::stats::TOP_TAG_LIMIT
}

/// Engine config: where the site data lives and how many tags to rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_data_url")]
    pub data_url: String,
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,
}

impl EngineConfig {
    /// Parse a JSON config; a blank string yields the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(EngineConfig::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            data_url: default_data_url(),
            top_tags: default_top_tags(),
        }
    }
}
