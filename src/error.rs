//! Typed errors for the catalog, search and export layers.
//!
//! Per-file copy failures are not errors here: they are collected into
//! [`crate::models::ExportReport::failures`] and never abort a batch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Startup failure while reading the metadata or downloaded-manifest tables
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {table} table {}: {source}", path.display())]
    Open {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read header row of {}: {source}", path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Too many consecutive malformed rows ({count}) in {} - file may be corrupted", path.display())]
    ConsecutiveFailures { path: PathBuf, count: usize },

    #[error("Too many malformed rows in {}: {failed} of {total} rows failed", path.display())]
    FailureRate { path: PathBuf, failed: usize, total: usize },
}

/// Invalid search request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Enter a search query.")]
    EmptyKeyword,

    #[error("Keyword cannot be searched: {0}")]
    Pattern(String),
}

/// Export request that could not produce a batch at all
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No models selected")]
    NoSelection,

    #[error("Export keyword is empty")]
    EmptyKeyword,

    #[error("Export keyword cannot be used as a folder name: {0:?}")]
    InvalidKeyword(String),

    #[error("Failed to allocate batch folder under {}: {source}", dir.display())]
    BatchAllocation {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<QueryError> for ExportError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::EmptyKeyword => ExportError::EmptyKeyword,
            QueryError::Pattern(reason) => ExportError::InvalidKeyword(reason),
        }
    }
}
