use crate::model::Id;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

#[derive(Debug)]
struct CacheEntry {
    generation: u64,
    ids: Vec<Id>,
}

/// Query results by key, as id lists
///
/// An entry is only served for the snapshot generation it was computed
/// from. Storing an entry for a newer generation drops every older one, so
/// the map never holds more than one generation's queries.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids cached under `key` for exactly this generation
    pub fn get(&self, key: &str, generation: u64) -> Option<Vec<Id>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let fresh = entries
            .get(key)
            .map(|entry| (entry.generation == generation).then(|| entry.ids.clone()));
        match fresh {
            Some(Some(ids)) => Some(ids),
            Some(None) => {
                tracing::debug!(key, "dropping stale query cache entry");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store ids for `key`, dropping entries from other generations
    pub fn set(&self, key: String, generation: u64, ids: Vec<Id>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.generation == generation);
        let pruned = before - entries.len();
        if pruned > 0 {
            tracing::debug!(pruned, generation, "pruned stale query cache entries");
        }
        entries.insert(key, CacheEntry { generation, ids });
    }

    /// Number of cached queries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry regardless of generation
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
