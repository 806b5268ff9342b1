//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Builder for a dataset root with `metadata.csv`, `downloaded_0.csv` and asset files
pub struct DatasetBuilder {
    temp_dir: TempDir,
    metadata: Vec<(String, String)>,
    downloaded: Vec<(String, String)>,
    raw_metadata: Option<String>,
    raw_downloaded: Option<String>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, metadata: Vec::new(), downloaded: Vec::new(), raw_metadata: None, raw_downloaded: None }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a downloaded asset: metadata row, manifest row and the file itself
    pub fn with_asset(mut self, hash: &str, caption: &str, local_path: &str) -> Self {
        let file = self.temp_dir.path().join(local_path);
        fs::create_dir_all(file.parent().expect("asset path has a parent"))
            .expect("Failed to create asset dir");
        fs::write(&file, format!("glTF {hash}")).expect("Failed to write asset");

        self.metadata.push((hash.to_string(), caption.to_string()));
        self.downloaded.push((hash.to_string(), local_path.to_string()));
        self
    }

    /// Add an asset listed in the manifest whose file is not on disk
    pub fn with_missing_file(mut self, hash: &str, caption: &str, local_path: &str) -> Self {
        self.metadata.push((hash.to_string(), caption.to_string()));
        self.downloaded.push((hash.to_string(), local_path.to_string()));
        self
    }

    /// Add a metadata row with no downloaded file
    pub fn with_metadata_only(mut self, hash: &str, caption: &str) -> Self {
        self.metadata.push((hash.to_string(), caption.to_string()));
        self
    }

    /// Replace the generated metadata table with raw CSV content
    pub fn with_raw_metadata(mut self, content: &str) -> Self {
        self.raw_metadata = Some(content.to_string());
        self
    }

    /// Replace the generated manifest table with raw CSV content
    pub fn with_raw_downloaded(mut self, content: &str) -> Self {
        self.raw_downloaded = Some(content.to_string());
        self
    }

    /// Write both tables and return the dataset root (consumes self)
    pub fn build(self) -> TempDir {
        let metadata = self
            .raw_metadata
            .unwrap_or_else(|| to_csv(("sha256", "captions"), &self.metadata));
        let downloaded = self
            .raw_downloaded
            .unwrap_or_else(|| to_csv(("sha256", "local_path"), &self.downloaded));

        fs::write(self.temp_dir.path().join("metadata.csv"), metadata)
            .expect("Failed to write metadata.csv");
        fs::write(self.temp_dir.path().join("downloaded_0.csv"), downloaded)
            .expect("Failed to write downloaded_0.csv");
        self.temp_dir
    }
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn to_csv(header: (&str, &str), rows: &[(String, String)]) -> String {
    let mut out = format!("{},{}\n", header.0, header.1);
    for (a, b) in rows {
        out.push_str(&format!("{},{}\n", quote(a), quote(b)));
    }
    out
}

/// The two-record catalog used throughout the docs: a red chair and a chairs-and-tables set
pub fn chair_dataset() -> TempDir {
    DatasetBuilder::new()
        .with_asset("a1", "A red chair", "glbs/000-001/a1.glb")
        .with_asset("b2", "chairs and tables", "glbs/000-001/b2.glb")
        .build()
}

/// A larger dataset with mixed captions, missing downloads and nested folders
pub fn realistic_dataset() -> TempDir {
    DatasetBuilder::new()
        .with_asset("a1", "A red chair", "glbs/000-001/a1.glb")
        .with_asset("b2", "chairs and tables", "glbs/000-001/b2.glb")
        .with_asset("c3", "Wooden CHAIR with armrests", "glbs/000-002/c3.glb")
        .with_metadata_only("d4", "Office chair, not downloaded")
        .with_asset("e5", "A category of cats", "glbs/000-002/e5.glb")
        .with_asset("f6", "Black cat sleeping on a table", "glbs/000-003/f6.glb")
        .with_asset("g7", "", "glbs/000-003/g7.glb")
        .with_asset("h8", "Rocking chair (antique)", "glbs/000-004/h8.glb")
        .build()
}
