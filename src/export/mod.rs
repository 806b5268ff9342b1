//! Batch export of selected assets
//!
//! # Output Layout
//!
//! ```text
//! <output_root>/
//! └── <keyword>/
//!     ├── 1/
//!     │   ├── a1.glb
//!     │   └── metadata.json     # [{path, filename, caption, content_hash}, ...]
//!     └── 2/
//!         └── ...
//! ```
//!
//! # Error Handling Strategy
//!
//! - **Request-level errors**: An empty selection, an unusable keyword, or a batch folder
//!   that cannot be created fail the whole call with an
//!   [`ExportError`](crate::error::ExportError).
//!
//! - **File-level errors**: A selection that cannot be resolved or copied is logged,
//!   recorded in the report's `failures`, and left out of the manifest. The rest of the
//!   batch still runs.
//!
//! - **No overwrites**: Every call allocates a new batch number, even for an identical
//!   selection. Numbers are never reused.

pub mod batch;
pub mod manager;
pub mod manifest;

pub use batch::{KeywordLocks, allocate_batch, existing_batch_numbers};
pub use manager::ExportManager;
pub use manifest::{MANIFEST_FILENAME, read_manifest, write_manifest};
