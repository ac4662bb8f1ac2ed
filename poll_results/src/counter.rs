use std::collections::HashMap;
use std::hash::Hash;

/// A frequency count that remembers the order in which keys were first seen.
///
/// `most_common` is a stable sort on decreasing counts: among equal counts,
/// the key inserted first comes first.
#[derive(Debug, Clone)]
pub(crate) struct FrequencyMap<K: Eq + Hash + Clone> {
    entries: Vec<(K, u64)>,
    positions: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> FrequencyMap<K> {
    pub(crate) fn new() -> FrequencyMap<K> {
        FrequencyMap {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub(crate) fn add(&mut self, key: &K) {
        match self.positions.get(key) {
            Some(pos) => self.entries[*pos].1 += 1,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), 1));
            }
        }
    }

    pub(crate) fn most_common(&self) -> Vec<(K, u64)> {
        let mut res = self.entries.clone();
        res.sort_by(|a, b| b.1.cmp(&a.1));
        res
    }

    pub(crate) fn first(&self) -> Option<(K, u64)> {
        self.most_common().first().cloned()
    }

    pub(crate) fn last(&self) -> Option<(K, u64)> {
        self.most_common().last().cloned()
    }
}
