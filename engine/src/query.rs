use crate::parse::normalize_term;
use crate::types::{FacetFilter, QueryCriteria, Record};

/// A compiled form of [`QueryCriteria`] with the search term lower-cased once
pub struct Matcher<'c> {
    needle: String,
    proposer: &'c FacetFilter,
    tag: &'c FacetFilter,
}

impl<'c> Matcher<'c> {
    pub fn new(criteria: &'c QueryCriteria) -> Self {
        Matcher {
            needle: normalize_term(&criteria.search_term),
            proposer: &criteria.proposer,
            tag: &criteria.tag,
        }
    }

    /// True iff the record passes the text, proposer and tag predicates
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_text(record) && self.matches_proposer(record) && self.matches_tag(record)
    }

    fn matches_text(&self, record: &Record) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|text| normalize_term(text).contains(&self.needle))
        };
        contains(&record.suggestion_text)
            || contains(&record.rationale)
            || contains(&record.episode_title)
            || record
                .tags
                .iter()
                .any(|tag| normalize_term(tag).contains(&self.needle))
    }

    fn matches_proposer(&self, record: &Record) -> bool {
        match self.proposer {
            FacetFilter::Any => true,
            FacetFilter::Only(name) => record.proposer_name.as_deref() == Some(name.as_str()),
        }
    }

    fn matches_tag(&self, record: &Record) -> bool {
        match self.tag {
            FacetFilter::Any => true,
            FacetFilter::Only(tag) => record.tags.iter().any(|t| t == tag),
        }
    }
}

/// Select the records matching `criteria`, keeping their original order
pub fn query<'a, I>(records: I, criteria: &QueryCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let matcher = Matcher::new(criteria);
    records
        .into_iter()
        .filter(|record| matcher.matches(record))
        .collect()
}

/// Parallel [`query`] for large collections; output order is identical
#[cfg(feature = "native")]
pub fn query_par<'a>(records: &'a [Record], criteria: &QueryCriteria) -> Vec<&'a Record> {
    use rayon::prelude::*;

    let matcher = Matcher::new(criteria);
    records
        .par_iter()
        .filter(|record| matcher.matches(record))
        .collect()
}
