//! Asset Search - keyword search and batch export over a 3D-asset caption catalog
//!
//! This library loads a dataset's metadata table and downloaded-assets manifest into an
//! immutable [`Catalog`], and supports:
//!
//! - Whole-word, case-insensitive caption search with per-keyword result caching
//! - Offset/limit paging over cached results
//! - Exporting selected assets into numbered batch folders with a `metadata.json` manifest
//!
//! # Example
//!
//! ```no_run
//! use asset_search::Config;
//!
//! let config = Config::new("/datasets/ObjaverseXL_sketchfab");
//! let service = config.search_service()?;
//! let page = service.search("chair", None, None)?;
//! println!("{} results", page.total);
//!
//! let selected: Vec<_> = page.entries.into_iter().map(Into::into).collect();
//! let report = config.export_manager().export_selection("chair", &selected)?;
//! println!("Exported {} files to {}", report.succeeded, report.batch_dir.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ExportError, LoadError, QueryError};
pub use export::ExportManager;
pub use loader::load;
pub use models::{Catalog, CatalogRecord, ExportReport, Page, SearchHit, SelectedEntry};
pub use search::{ResultCache, SearchService};
