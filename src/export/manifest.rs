//! Per-batch `metadata.json`: load/save with atomic writes

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::models::ManifestEntry;

pub const MANIFEST_FILENAME: &str = "metadata.json";

/// Write the manifest for a batch (temp file + rename), returning its path
///
/// The temp file gets a fresh, exclusively created name in `batch_dir`, so it
/// never replaces an exported asset.
pub fn write_manifest(batch_dir: &Path, entries: &[ManifestEntry]) -> io::Result<PathBuf> {
    let path = batch_dir.join(MANIFEST_FILENAME);

    let mut temp = NamedTempFile::new_in(batch_dir)?;
    serde_json::to_writer_pretty(&mut temp, entries)?;
    temp.flush()?;
    temp.persist(&path)?;

    Ok(path)
}

/// Read a batch manifest back
pub fn read_manifest(batch_dir: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    use anyhow::Context;

    let path = batch_dir.join(MANIFEST_FILENAME);
    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to parse manifest JSON")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_manifest_shape() {
        let dir = TempDir::new().unwrap();
        let entries = vec![ManifestEntry {
            path: dir.path().join("a1.glb"),
            filename: "a1.glb".to_string(),
            caption: "A red chair".to_string(),
            content_hash: "a1".to_string(),
        }];

        let path = write_manifest(dir.path(), &entries).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["filename"], "a1.glb");
        assert_eq!(first["caption"], "A red chair");
        assert_eq!(first["content_hash"], "a1");
        assert!(first["path"].as_str().unwrap().ends_with("a1.glb"));
        let names: Vec<_> =
            fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names, vec![MANIFEST_FILENAME]);
    }

    #[test]
    fn test_empty_manifest_is_empty_array() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), &[]).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap(), "[]");
        assert!(read_manifest(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_manifest_fails() {
        let dir = TempDir::new().unwrap();
        let err = read_manifest(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read manifest"));
    }
}
