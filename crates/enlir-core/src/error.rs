//! Error types for enlir-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in enlir-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a worksheet export
    #[error("failed to parse worksheet '{path}': {message}")]
    SheetParse { path: PathBuf, message: String },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// No snapshot of the requested kind exists in the store
    #[error("no {kind} snapshot found under '{dir}'")]
    SnapshotNotFound { kind: &'static str, dir: PathBuf },

    /// Worksheet header does not carry a column a transformer needs
    #[error("column mismatch: worksheet '{sheet}' has no column '{column}'")]
    ColumnMismatch { sheet: String, column: String },

    /// A type-list id that is not part of the static table reached the merge
    #[error("id {id} is not defined in type list '{list}'")]
    UnknownTypeListId { list: &'static str, id: u32 },

    /// A name join matched more than one candidate (strict mode only)
    #[error("ambiguous join in pass '{pass}': '{key}' matches {count} candidates for {record}")]
    AmbiguousJoin {
        pass: &'static str,
        record: String,
        key: String,
        count: usize,
    },

    /// A relic name already carries a parenthesised suffix (strict mode only)
    #[error("relic '{relic}' already carries a parenthesised suffix; realm-qualified joins would be unreliable")]
    QualifiedRelicName { relic: String },

    /// A merge pass failed; the whole run is abandoned
    #[error("merge aborted in pass '{pass}': {source}")]
    MergeAborted {
        pass: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
