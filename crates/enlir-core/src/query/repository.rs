use crate::error::Result;
use crate::model::MergeResultsContainer;
use crate::storage::MergeStorage;
use std::sync::{Arc, PoisonError, RwLock};

/// One published merge result; `generation` increases with every publish
#[derive(Debug, Default)]
pub struct Snapshot {
    pub generation: u64,
    pub results: MergeResultsContainer,
}

/// Holder of the current snapshot
///
/// Publishing swaps in a whole new snapshot; readers keep whatever `Arc` they
/// already hold, so nobody ever observes a partially replaced container.
#[derive(Debug)]
pub struct EnlirRepository {
    current: RwLock<Arc<Snapshot>>,
}

impl Default for EnlirRepository {
    fn default() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::default())),
        }
    }
}

impl EnlirRepository {
    /// Repository serving `results` as generation 1
    pub fn new(results: MergeResultsContainer) -> Self {
        let repository = Self::default();
        repository.publish(results);
        repository
    }

    /// Seed from the newest stored merge snapshot
    pub fn from_storage<S: MergeStorage>(storage: &S) -> Result<Self> {
        Ok(Self::new(storage.retrieve_latest_merge_results()?))
    }

    /// The snapshot published most recently
    pub fn current(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the current snapshot, returning the new generation
    pub fn publish(&self, results: MergeResultsContainer) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let generation = guard.generation + 1;
        *guard = Arc::new(Snapshot {
            generation,
            results,
        });
        tracing::info!(generation, "published merge snapshot");
        generation
    }

    /// Publish the newest stored merge snapshot
    pub fn reload<S: MergeStorage>(&self, storage: &S) -> Result<u64> {
        let results = storage.retrieve_latest_merge_results()?;
        Ok(self.publish(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_swaps_whole_snapshot() {
        let repository = EnlirRepository::new(MergeResultsContainer::default());
        let before = repository.current();
        assert_eq!(before.generation, 1);

        let mut results = MergeResultsContainer::default();
        results.experiences.push(Default::default());
        let generation = repository.publish(results);

        assert_eq!(generation, 2);
        assert_eq!(repository.current().results.experiences.len(), 1);
        // readers holding the old snapshot are unaffected
        assert!(before.results.experiences.is_empty());
    }
}
