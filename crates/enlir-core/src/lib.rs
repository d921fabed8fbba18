//! enlir-core: Core library for transforming and merging Enlir game-data worksheets
//!
//! This library provides functionality to:
//! - Scan a directory of CSV worksheet exports and validate their structure
//! - Transform raw rows into typed, unlinked entities
//! - Merge those entities into one cross-linked data graph by name joins
//! - Store transform and merge snapshots as JSON files
//! - Serve the merged graph through a cached, read-only query layer

pub mod config;
pub mod convert;
pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod query;
pub mod scanner;
pub mod sheet;
pub mod storage;
pub mod transform;
pub mod type_list;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use config::{EtlConfig, MergeOptions};
pub use error::{Error, Result};
pub use merge::{execute_merge, MergeDiagnostics, MergeManager, MergeRun, PassStats, StatusResolver};
pub use model::{EntityKind, Id, MergeResultsContainer, Record, TransformResultsContainer};
pub use parser::{parse_sheet, parse_sheet_str};
pub use query::{EnlirRepository, QueryCache, QueryContext, Snapshot};
pub use scanner::{scan_import_dir, ImportResults};
pub use sheet::{Sheet, SheetKind};
pub use storage::{MergeStorage, SnapshotStore, TransformStorage};
pub use transform::{RowTransformer, TransformManager};
pub use type_list::{IdLabel, TypeList};
pub use validation::{validate_import, ValidationReport};
