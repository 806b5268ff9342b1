//! Catalog loading from the metadata and downloaded-manifest CSV tables
//!
//! # Error Handling Strategy
//!
//! Loading runs once at startup and any [`LoadError`](crate::error::LoadError) is fatal:
//!
//! - **File-level errors**: A missing or unreadable table, or a table without the content
//!   hash column, fails the load. No query can run without a catalog.
//!
//! - **Row-level errors**: Malformed rows (wrong field count, invalid UTF-8, empty hash) are
//!   logged and skipped so one bad line does not break the catalog.
//!
//! - **Catastrophic failure detection**: If >50% of rows fail, or 100 consecutive rows fail,
//!   the table is rejected as corrupted.
//!
//! - **Duplicates**: The first row for a content hash wins in both tables. Later rows are
//!   counted in [`LoadSummary::duplicate_hashes`](crate::models::LoadSummary).

pub mod builder;
pub mod tables;

pub use builder::{load, load_with_schema};
pub use tables::TableSchema;
