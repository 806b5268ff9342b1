//! Data models for the asset catalog, search results and export batches.
//!
//! - [`CatalogRecord`] / [`Catalog`] - joined metadata rows, immutable after load
//! - [`SearchHit`] / [`SearchResult`] / [`Page`] - cached keyword results and page views
//! - [`SelectedEntry`] / [`ManifestEntry`] / [`ExportReport`] - export input and output

pub mod catalog;
pub mod export;
pub mod search;

pub use catalog::{Catalog, CatalogRecord, CatalogStats, LoadSummary};
pub use export::{CopyFailure, ExportReport, ManifestEntry, SelectedEntry};
pub use search::{Page, SearchHit, SearchResult};
