//! Startup configuration: where the dataset lives and where exports go.
//!
//! Values are supplied once at startup (the CLI fills them from flags or
//! `ASSET_SEARCH_*` environment variables). Relative table paths resolve
//! against the dataset root.

use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::export::ExportManager;
use crate::loader::{self, TableSchema};
use crate::models::Catalog;
use crate::search::{DEFAULT_PAGE_SIZE, SearchService};
use crate::utils::DEFAULT_ROUTE_PREFIX;

pub const DEFAULT_METADATA_FILE: &str = "metadata.csv";
pub const DEFAULT_DOWNLOADED_FILE: &str = "downloaded_0.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "exports";

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_root: PathBuf,
    pub metadata_file: PathBuf,
    pub downloaded_file: PathBuf,
    pub output_root: PathBuf,
    pub route_prefix: String,
    pub page_size: usize,
    pub schema: TableSchema,
}

impl Config {
    /// Defaults for a dataset root: `metadata.csv`, `downloaded_0.csv` and an
    /// `exports/` output folder inside it
    pub fn new(dataset_root: impl Into<PathBuf>) -> Self {
        let dataset_root = dataset_root.into();
        Self {
            metadata_file: dataset_root.join(DEFAULT_METADATA_FILE),
            downloaded_file: dataset_root.join(DEFAULT_DOWNLOADED_FILE),
            output_root: dataset_root.join(DEFAULT_OUTPUT_DIR),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            schema: TableSchema::default(),
            dataset_root,
        }
    }

    pub fn with_metadata_file(mut self, path: impl AsRef<Path>) -> Self {
        self.metadata_file = resolve_against(&self.dataset_root, path.as_ref());
        self
    }

    pub fn with_downloaded_file(mut self, path: impl AsRef<Path>) -> Self {
        self.downloaded_file = resolve_against(&self.dataset_root, path.as_ref());
        self
    }

    pub fn with_output_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_root = path.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn load_catalog(&self) -> Result<Catalog, LoadError> {
        loader::load_with_schema(&self.metadata_file, &self.downloaded_file, &self.schema)
    }

    /// Load the catalog and wrap it in a search service with a fresh result cache
    pub fn search_service(&self) -> Result<SearchService, LoadError> {
        Ok(SearchService::new(self.load_catalog()?)
            .with_route_prefix(self.route_prefix.clone())
            .with_page_size(self.page_size))
    }

    pub fn export_manager(&self) -> ExportManager {
        ExportManager::new(&self.dataset_root, &self.output_root)
            .with_route_prefix(self.route_prefix.clone())
    }
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { root.join(path) }
}
