use crate::rank::{top_n, Tally};
use crate::types::{ProposerStats, Record, StatsSnapshot, TagCount};

/// Number of tags kept in the frequency ranking
pub const TOP_TAG_LIMIT: usize = 15;

/// Suggestions and awarded points of one proposer
#[derive(Debug, Default, Clone, Copy)]
struct ProposerTally {
    count: usize,
    awarded: usize,
}

/// Compute summary statistics over a set of records
pub fn aggregate<'a, I>(records: I) -> StatsSnapshot
where
    I: IntoIterator<Item = &'a Record>,
{
    aggregate_with_limit(records, TOP_TAG_LIMIT)
}

/// [`aggregate`] with a custom bound on the tag ranking
pub fn aggregate_with_limit<'a, I>(records: I, tag_limit: usize) -> StatsSnapshot
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut total_count = 0;
    let mut proposers: Tally<&str, ProposerTally> = Tally::new();
    let mut tags: Tally<&str, usize> = Tally::new();

    for record in records {
        total_count += 1;

        if let Some(name) = record.proposer() {
            let entry = proposers.entry(name);
            entry.count += 1;
            if record.point_awarded {
                entry.awarded += 1;
            }
        }

        for tag in &record.tags {
            *tags.entry(tag.as_str()) += 1;
        }
    }

    let per_proposer: Vec<ProposerStats> = proposers
        .into_entries()
        .into_iter()
        .map(|(name, tally)| ProposerStats {
            name: name.to_string(),
            count: tally.count,
            awarded: tally.awarded,
            success_rate: success_rate(tally.awarded, tally.count),
        })
        .collect();

    let top_tags: Vec<TagCount> = tags
        .into_entries()
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();

    StatsSnapshot {
        total_count,
        per_proposer: top_n(per_proposer, usize::MAX, |p| p.count),
        top_tags: top_n(top_tags, tag_limit, |t| t.count),
    }
}

/// Percentage of awarded suggestions, rounded to one decimal place
pub fn success_rate(awarded: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (awarded as f64 / count as f64 * 1000.0).round() / 10.0
}
