//! Command-line surface over the search and export core
//!
//! Each subcommand loads the catalog once, then calls the same operations an
//! HTTP front end would: `search` pages through cached results, `export` hands a
//! selection to the export manager, `resolve` maps a display route back to a file.

pub mod commands;
pub mod shell;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::config::Config;

pub use commands::run;

#[derive(Debug, Parser)]
#[command(name = "asset-search")]
#[command(version)]
#[command(about = "Search 3D-asset captions and export selected models", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Args)]
pub struct DatasetArgs {
    /// Dataset root containing the tables and downloaded assets
    #[arg(long, env = "ASSET_SEARCH_DATASET_ROOT", global = true)]
    pub dataset_root: Option<PathBuf>,

    /// Metadata table (relative paths resolve against the dataset root)
    #[arg(long, env = "ASSET_SEARCH_METADATA", global = true)]
    pub metadata: Option<PathBuf>,

    /// Downloaded-assets manifest table (relative paths resolve against the dataset root)
    #[arg(long, env = "ASSET_SEARCH_DOWNLOADED", global = true)]
    pub downloaded: Option<PathBuf>,

    /// Root folder for export batches [default: <dataset-root>/exports]
    #[arg(long, env = "ASSET_SEARCH_OUTPUT_ROOT", global = true)]
    pub output_root: Option<PathBuf>,
}

impl DatasetArgs {
    pub fn to_config(&self) -> Result<Config> {
        let Some(root) = &self.dataset_root else {
            bail!("Dataset root not set (use --dataset-root or ASSET_SEARCH_DATASET_ROOT)");
        };

        let mut config = Config::new(root);
        if let Some(metadata) = &self.metadata {
            config = config.with_metadata_file(metadata);
        }
        if let Some(downloaded) = &self.downloaded {
            config = config.with_downloaded_file(downloaded);
        }
        if let Some(output_root) = &self.output_root {
            config = config.with_output_root(output_root);
        }
        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search captions for a whole-word keyword
    Search {
        keyword: String,

        /// Index of the first result to show
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Number of results to show [default: 10]
        #[arg(long)]
        limit: Option<usize>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export selected search results into a new numbered batch folder
    Export {
        keyword: String,

        /// Content hash of a result to export (repeatable)
        #[arg(long = "hash", value_name = "HASH")]
        hashes: Vec<String>,

        /// Export every result for the keyword
        #[arg(long, conflicts_with_all = ["hashes", "selection"])]
        all: bool,

        /// JSON file with selected entries ([{path, caption, content_hash}, ...])
        #[arg(long, conflicts_with = "hashes")]
        selection: Option<PathBuf>,

        /// Print the export report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show statistics about the loaded catalog
    Stats,
    /// Interactive keyword search (type 'exit' to quit)
    Shell,
    /// Print the file a display route points to
    Resolve { display_path: String },
}
