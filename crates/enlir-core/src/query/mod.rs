//! Read-only query layer over the published merge snapshot
//!
//! Every facade reads the snapshot current at call time and never mutates
//! it. Results of filtered queries are cached as id lists, stamped with the
//! snapshot generation they were computed from.

mod abilities;
mod cache;
mod commands;
mod limit_breaks;
mod missions;
mod repository;
mod soul_breaks;

pub use abilities::AbilitiesLogic;
pub use cache::QueryCache;
pub use commands::{CommandSearch, CommandsLogic, SynchroCommandsLogic};
pub use limit_breaks::{LimitBreakSearch, LimitBreaksLogic};
pub use missions::{ExperiencesLogic, MissionsLogic};
pub use repository::{EnlirRepository, Snapshot};
pub use soul_breaks::SoulBreaksLogic;

use crate::model::{Id, Record};
use std::collections::HashSet;
use std::sync::Arc;

/// Lowercased, trimmed search text; `None` when blank
pub(crate) fn search_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

/// Case-insensitive containment; `needle` must come from `search_text`
pub(crate) fn contains_text(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Unset criteria match everything
pub(crate) fn matches_eq<V: PartialEq>(criterion: &Option<V>, value: &V) -> bool {
    criterion.as_ref().map_or(true, |c| c == value)
}

/// Unset or blank text criteria match everything
pub(crate) fn matches_text(criterion: &Option<String>, value: &str) -> bool {
    match criterion.as_deref().and_then(search_text) {
        Some(needle) => contains_text(value, &needle),
        None => true,
    }
}

/// Repository and cache shared by the logic facades
#[derive(Debug, Clone)]
pub struct QueryContext {
    repository: Arc<EnlirRepository>,
    cache: Arc<QueryCache>,
}

impl QueryContext {
    /// Context sharing one repository and one cache
    pub fn new(repository: Arc<EnlirRepository>, cache: Arc<QueryCache>) -> Self {
        Self { repository, cache }
    }

    /// Get the repository
    pub fn repository(&self) -> &EnlirRepository {
        &self.repository
    }

    /// Get the query cache
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub(crate) fn snapshot(&self) -> Arc<Snapshot> {
        self.repository.current()
    }

    /// Records of `items` matching `predicate`, served from the cache when an
    /// entry for `key` exists for this snapshot's generation
    pub(crate) fn cached<T: Record + Clone>(
        &self,
        key: String,
        snapshot: &Snapshot,
        items: &[T],
        predicate: impl Fn(&T) -> bool,
    ) -> Vec<T> {
        if let Some(ids) = self.cache.get(&key, snapshot.generation) {
            tracing::debug!(key = %key, "query cache hit");
            let ids: HashSet<Id> = ids.into_iter().collect();
            return items.iter().filter(|item| ids.contains(&item.id())).cloned().collect();
        }

        let results: Vec<T> = items.iter().filter(|&item| predicate(item)).cloned().collect();
        self.cache
            .set(key, snapshot.generation, results.iter().map(Record::id).collect());
        results
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text() {
        assert_eq!(search_text("  Omni "), Some("omni".to_string()));
        assert_eq!(search_text("   "), None);
        assert!(contains_text("Omnislash Version 5", "slash"));
    }

    #[test]
    fn test_unset_criteria_match() {
        assert!(matches_eq(&None, &3u32));
        assert!(!matches_eq(&Some(2u32), &3u32));
        assert!(matches_text(&Some(" ".to_string()), "anything"));
        assert!(!matches_text(&Some("xyz".to_string()), "anything"));
    }
}
