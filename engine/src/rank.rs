use indexmap::IndexMap;
use std::hash::Hash;

/// Insertion-ordered counters: keys keep the order they were first seen
#[derive(Debug, Clone)]
pub struct Tally<K, V> {
    entries: IndexMap<K, V>,
}

impl<K: Hash + Eq, V: Default> Tally<K, V> {
    pub fn new() -> Self {
        Tally {
            entries: IndexMap::new(),
        }
    }

    /// Counter for `key`, created at the end of the order if unseen
    pub fn entry(&mut self, key: K) -> &mut V {
        self.entries.entry(key).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into (key, counter) pairs in first-seen order
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries.into_iter().collect()
    }
}

impl<K: Hash + Eq, V: Default> Default for Tally<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort by `count` descending and keep at most `n` items.
/// The sort is stable, so equal counts keep their incoming order
pub fn top_n<T, F>(mut items: Vec<T>, n: usize, count: F) -> Vec<T>
where
    F: Fn(&T) -> usize,
{
    items.sort_by(|a, b| count(b).cmp(&count(a)));
    items.truncate(n);
    items
}
