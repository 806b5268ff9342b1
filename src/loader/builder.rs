use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use tracing::{info, warn};

use super::tables::{TableSchema, read_rows};
use crate::error::LoadError;
use crate::models::{Catalog, CatalogRecord, LoadSummary};

/// Load the catalog using the dataset's default column names
/// (`sha256`, `captions`, `local_path`).
pub fn load(metadata_path: &Path, downloaded_path: &Path) -> Result<Catalog, LoadError> {
    load_with_schema(metadata_path, downloaded_path, &TableSchema::default())
}

/// Load the metadata table and left-join the downloaded manifest onto it by content hash
///
/// Every metadata row becomes one [`CatalogRecord`] in file order. Rows without a
/// manifest match (or whose manifest path cell is empty) get `local_path: None`.
/// Captions are kept exactly as they appear in the source table.
///
/// # Errors
///
/// Returns a [`LoadError`] if either file cannot be opened, lacks a required column,
/// or is rejected as corrupted by the row failure thresholds.
pub fn load_with_schema(
    metadata_path: &Path,
    downloaded_path: &Path,
    schema: &TableSchema,
) -> Result<Catalog, LoadError> {
    let (paths, manifest_rows, manifest_duplicates) = load_downloaded(downloaded_path, schema)?;

    let metadata = read_rows(
        metadata_path,
        "metadata",
        &[schema.hash_column.as_str(), schema.caption_column.as_str()],
        |fields| {
            let hash = fields[0].trim();
            if hash.is_empty() {
                return Err(format!("empty '{}' value", schema.hash_column));
            }
            Ok(CatalogRecord {
                content_hash: hash.to_string(),
                caption: fields[1].to_string(),
                local_path: paths.get(hash).cloned(),
            })
        },
    )?;

    let summary = LoadSummary {
        metadata_rows: metadata.total,
        manifest_rows,
        skipped_rows: metadata.skipped,
        duplicate_hashes: manifest_duplicates,
    };
    let catalog = Catalog::from_records(metadata.rows).with_summary(summary);

    let stats = catalog.stats();
    info!(
        records = stats.total,
        downloaded = stats.downloaded,
        skipped = catalog.summary().skipped_rows,
        duplicates = catalog.summary().duplicate_hashes,
        "loaded catalog from {}",
        metadata_path.display()
    );

    Ok(catalog)
}

/// Read the downloaded manifest into a hash → local path map (first row wins)
fn load_downloaded(
    path: &Path,
    schema: &TableSchema,
) -> Result<(HashMap<String, String>, usize, usize), LoadError> {
    let columns = [schema.hash_column.as_str(), schema.path_column.as_str()];
    let table = read_rows(path, "downloaded", &columns, |f| {
        let hash = f[0].trim();
        if hash.is_empty() {
            return Err(format!("empty '{}' value", schema.hash_column));
        }
        Ok((hash.to_string(), f[1].trim().to_string()))
    })?;

    let mut paths = HashMap::with_capacity(table.rows.len());
    let mut duplicates = 0;
    for (hash, local_path) in table.rows {
        if local_path.is_empty() {
            continue;
        }
        match paths.entry(hash) {
            Entry::Vacant(slot) => {
                slot.insert(local_path);
            }
            Entry::Occupied(existing) => {
                warn!(hash = %existing.key(), "duplicate hash in downloaded manifest, keeping first");
                duplicates += 1;
            }
        }
    }

    Ok((paths, table.total, duplicates))
}
