use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An asset chosen by the caller from a previous search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEntry {
    #[serde(alias = "displayPath", alias = "display_path")]
    pub path: String,
    #[serde(default)]
    pub caption: String,
    #[serde(alias = "sha256")]
    pub content_hash: String,
}

impl From<crate::models::SearchHit> for SelectedEntry {
    fn from(hit: crate::models::SearchHit) -> Self {
        Self { path: hit.path, caption: hit.caption, content_hash: hit.content_hash }
    }
}

/// One line of a batch's `metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Destination path of the copied file
    pub path: PathBuf,
    pub filename: String,
    pub caption: String,
    pub content_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFailure {
    pub source: String,
    pub reason: String,
}

/// Outcome of one export call
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub keyword: String,
    pub batch: u64,
    pub batch_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub requested: usize,
    pub succeeded: usize,
    pub failures: Vec<CopyFailure>,
    pub exported_at: DateTime<Utc>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.succeeded == self.requested
    }
}
