//! Flat-file snapshot store for transform and merge results
//!
//! Snapshots are pretty JSON files named with a UTC timestamp, so the
//! lexicographically greatest file name is always the newest snapshot.

use crate::error::{Error, Result};
use crate::model::{MergeResultsContainer, TransformResultsContainer};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TRANSFORM_DIR: &str = "transform";
const TRANSFORM_PREFIX: &str = "transform_results_";
const MERGE_DIR: &str = "merge";
const MERGE_PREFIX: &str = "merge_results_";

/// Where transform output is kept between stages
pub trait TransformStorage {
    /// Write a new snapshot and return its path
    fn store_transform_results(&self, results: &TransformResultsContainer) -> Result<PathBuf>;

    fn retrieve_latest_transform_results(&self) -> Result<TransformResultsContainer>;

    fn retrieve_transform_results(&self, path: &Path) -> Result<TransformResultsContainer>;
}

/// Where merge output is published for the query layer
pub trait MergeStorage {
    /// Write a new snapshot and return its path
    fn store_merge_results(&self, results: &MergeResultsContainer) -> Result<PathBuf>;

    fn retrieve_latest_merge_results(&self) -> Result<MergeResultsContainer>;
}

impl<T: TransformStorage + ?Sized> TransformStorage for &T {
    fn store_transform_results(&self, results: &TransformResultsContainer) -> Result<PathBuf> {
        (**self).store_transform_results(results)
    }

    fn retrieve_latest_transform_results(&self) -> Result<TransformResultsContainer> {
        (**self).retrieve_latest_transform_results()
    }

    fn retrieve_transform_results(&self, path: &Path) -> Result<TransformResultsContainer> {
        (**self).retrieve_transform_results(path)
    }
}

impl<T: MergeStorage + ?Sized> MergeStorage for &T {
    fn store_merge_results(&self, results: &MergeResultsContainer) -> Result<PathBuf> {
        (**self).store_merge_results(results)
    }

    fn retrieve_latest_merge_results(&self) -> Result<MergeResultsContainer> {
        (**self).retrieve_latest_merge_results()
    }
}

/// Snapshot directory: `<root>/transform/` and `<root>/merge/`
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the newest transform snapshot
    pub fn latest_transform_path(&self) -> Result<PathBuf> {
        self.latest(TRANSFORM_DIR, TRANSFORM_PREFIX, "transform")
    }

    /// Path of the newest merge snapshot
    pub fn latest_merge_path(&self) -> Result<PathBuf> {
        self.latest(MERGE_DIR, MERGE_PREFIX, "merge")
    }

    fn latest(&self, subdir: &str, prefix: &str, kind: &'static str) -> Result<PathBuf> {
        let dir = self.root.join(subdir);
        let not_found = || Error::SnapshotNotFound {
            kind,
            dir: dir.clone(),
        };
        if !dir.is_dir() {
            return Err(not_found());
        }

        let mut latest: Option<PathBuf> = None;
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let is_snapshot = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".json"));
            if !is_snapshot {
                continue;
            }
            if latest.as_ref().map_or(true, |current| {
                current.file_name() < Some(entry.file_name())
            }) {
                latest = Some(entry.into_path());
            }
        }

        latest.ok_or_else(not_found)
    }

    fn write<T: Serialize>(&self, subdir: &str, prefix: &str, value: &T) -> Result<PathBuf> {
        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir)?;

        let timestamp = Utc::now().format("%Y%m%dT%H%M%S_%9f");
        let path = dir.join(format!("{}{}.json", prefix, timestamp));
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)?;

        tracing::info!(path = %path.display(), "stored snapshot");
        Ok(path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "read snapshot");
    serde_json::from_str(&content).map_err(Error::Json)
}

impl TransformStorage for SnapshotStore {
    fn store_transform_results(&self, results: &TransformResultsContainer) -> Result<PathBuf> {
        self.write(TRANSFORM_DIR, TRANSFORM_PREFIX, results)
    }

    fn retrieve_latest_transform_results(&self) -> Result<TransformResultsContainer> {
        read_json(&self.latest_transform_path()?)
    }

    fn retrieve_transform_results(&self, path: &Path) -> Result<TransformResultsContainer> {
        read_json(path)
    }
}

impl MergeStorage for SnapshotStore {
    fn store_merge_results(&self, results: &MergeResultsContainer) -> Result<PathBuf> {
        self.write(MERGE_DIR, MERGE_PREFIX, results)
    }

    fn retrieve_latest_merge_results(&self) -> Result<MergeResultsContainer> {
        read_json(&self.latest_merge_path()?)
    }
}
