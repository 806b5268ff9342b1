use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use tracing::{info, warn};

use super::batch::{KeywordLocks, allocate_batch};
use super::manifest::{MANIFEST_FILENAME, write_manifest};
use crate::error::ExportError;
use crate::models::{CopyFailure, ExportReport, ManifestEntry, SelectedEntry};
use crate::search::normalize_keyword;
use crate::utils::{DEFAULT_ROUTE_PREFIX, resolve_asset_path};

/// Copies selected assets into numbered batch folders under `output_root/<keyword>/`
#[derive(Debug)]
pub struct ExportManager {
    dataset_root: PathBuf,
    output_root: PathBuf,
    route_prefix: String,
    locks: KeywordLocks,
}

impl ExportManager {
    pub fn new(dataset_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            dataset_root: dataset_root.into(),
            output_root: output_root.into(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            locks: KeywordLocks::new(),
        }
    }

    pub fn with_route_prefix(mut self, route_prefix: impl Into<String>) -> Self {
        self.route_prefix = route_prefix.into();
        self
    }

    pub fn dataset_root(&self) -> &Path {
        &self.dataset_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Folder holding every batch for a keyword
    pub fn keyword_dir(&self, keyword: &str) -> Result<PathBuf, ExportError> {
        let keyword = normalize_keyword(keyword)?;
        validate_folder_name(&keyword)?;
        Ok(self.output_root.join(keyword))
    }

    /// Export the selected assets into a fresh batch folder
    ///
    /// Each entry's display path is resolved under the dataset root and copied with its
    /// original filename. Entries that fail are reported, not fatal. The batch manifest
    /// lists only the entries that were copied.
    ///
    /// Calling this twice with the same arguments produces two batches.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the selection is empty, the keyword is empty or not
    /// usable as a folder name, or the batch folder or manifest cannot be written.
    pub fn export_selection(
        &self,
        keyword: &str,
        selected: &[SelectedEntry],
    ) -> Result<ExportReport, ExportError> {
        let keyword = normalize_keyword(keyword)?;
        validate_folder_name(&keyword)?;
        let keyword_dir = self.output_root.join(&keyword);
        if selected.is_empty() {
            return Err(ExportError::NoSelection);
        }

        let (batch, batch_dir) = {
            let lock = self.locks.lock_for(&keyword);
            let _guard = lock.lock();
            allocate_batch(&keyword_dir)
                .map_err(|source| ExportError::BatchAllocation { dir: keyword_dir.clone(), source })?
        };
        info!(keyword = %keyword, batch, selected = selected.len(), "exporting to {}", batch_dir.display());

        let mut manifest = Vec::with_capacity(selected.len());
        let mut failures = Vec::new();
        let mut used_names = HashSet::new();

        for entry in selected {
            let source = match resolve_asset_path(&self.dataset_root, &self.route_prefix, &entry.path)
            {
                Ok(source) => source,
                Err(e) => {
                    warn!(path = %entry.path, "cannot resolve selected asset: {e:#}");
                    failures.push(CopyFailure { source: entry.path.clone(), reason: format!("{e:#}") });
                    continue;
                }
            };

            match copy_into_batch(&source, &batch_dir, &mut used_names) {
                Ok((destination, filename)) => manifest.push(ManifestEntry {
                    path: destination,
                    filename,
                    caption: entry.caption.clone(),
                    content_hash: entry.content_hash.clone(),
                }),
                Err(e) => {
                    warn!(source = %source.display(), "failed to copy asset: {e:#}");
                    failures.push(CopyFailure {
                        source: source.display().to_string(),
                        reason: format!("{e:#}"),
                    });
                }
            }
        }

        let manifest_path = write_manifest(&batch_dir, &manifest).map_err(|source| {
            ExportError::Manifest { path: batch_dir.join(MANIFEST_FILENAME), source }
        })?;

        info!(
            keyword = %keyword,
            batch,
            succeeded = manifest.len(),
            failed = failures.len(),
            "export finished"
        );

        Ok(ExportReport {
            keyword,
            batch,
            batch_dir,
            manifest_path,
            requested: selected.len(),
            succeeded: manifest.len(),
            failures,
            exported_at: Utc::now(),
        })
    }
}

/// Copy one asset into the batch, keeping its filename
///
/// Names are compared case-insensitively so case-insensitive filesystems
/// cannot merge two assets (or an asset and the manifest) into one file.
fn copy_into_batch(
    source: &Path,
    batch_dir: &Path,
    used_names: &mut HashSet<String>,
) -> Result<(PathBuf, String)> {
    let filename = source
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Asset path has no usable file name"))?
        .to_string();

    let folded = filename.to_lowercase();
    if folded == MANIFEST_FILENAME {
        bail!("File name '{filename}' is reserved for the batch manifest");
    }
    if used_names.contains(&folded) {
        bail!("Another selected asset is already exported as '{filename}'");
    }

    let destination = batch_dir.join(&filename);
    fs::copy(source, &destination)
        .with_context(|| format!("Failed to copy {}", source.display()))?;
    used_names.insert(folded);

    Ok((destination, filename))
}

/// A normalized keyword becomes one directory level under the output root
fn validate_folder_name(keyword: &str) -> Result<(), ExportError> {
    let invalid = keyword == "."
        || keyword == ".."
        || keyword.contains(['/', '\\', '\0'])
        || keyword.chars().any(char::is_control);
    if invalid {
        return Err(ExportError::InvalidKeyword(keyword.to_string()));
    }
    Ok(())
}
