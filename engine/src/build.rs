use crate::types::{FacetIndex, Record};
use std::collections::BTreeSet;

/// Build the facet index from a record collection.
/// Collects distinct proposer names and tags, each sorted for display
pub fn build_facets<'a, I>(records: I) -> FacetIndex
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut proposers: BTreeSet<&str> = BTreeSet::new();
    let mut tags: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        if let Some(name) = record.proposer() {
            proposers.insert(name);
        }
        tags.extend(record.tags.iter().map(String::as_str));
    }

    FacetIndex {
        proposers: proposers.into_iter().map(str::to_string).collect(),
        tags: tags.into_iter().map(str::to_string).collect(),
    }
}
