use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One asset row after joining metadata onto the downloaded manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub content_hash: String,
    pub caption: String,
    pub local_path: Option<String>,
}

impl CatalogRecord {
    pub fn is_downloaded(&self) -> bool {
        self.local_path.is_some()
    }
}

/// Row counts collected while loading the two source tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub metadata_rows: usize,
    pub manifest_rows: usize,
    pub skipped_rows: usize,
    pub duplicate_hashes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub downloaded: usize,
    pub captioned: usize,
}

/// In-memory table of searchable records, in source order.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    by_hash: HashMap<String, usize>,
    summary: LoadSummary,
}

impl Catalog {
    /// Build a catalog from records, keeping the first record for each content hash
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            if catalog.by_hash.contains_key(&record.content_hash) {
                warn!(
                    hash = %record.content_hash,
                    "duplicate hash in metadata table, keeping first"
                );
                catalog.summary.duplicate_hashes += 1;
                continue;
            }
            catalog.by_hash.insert(record.content_hash.clone(), catalog.records.len());
            catalog.records.push(record);
        }
        catalog
    }

    pub(crate) fn with_summary(mut self, summary: LoadSummary) -> Self {
        let duplicates = self.summary.duplicate_hashes + summary.duplicate_hashes;
        self.summary = LoadSummary { duplicate_hashes: duplicates, ..summary };
        self
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRecord> {
        self.records.iter()
    }

    pub fn get(&self, content_hash: &str) -> Option<&CatalogRecord> {
        self.by_hash.get(content_hash).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.records.len(),
            downloaded: self.records.iter().filter(|r| r.is_downloaded()).count(),
            captioned: self.records.iter().filter(|r| !r.caption.trim().is_empty()).count(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
