//! Diagnostic logging for the CLI
//!
//! Everything goes to stderr so `search --json` and `export --json` output on
//! stdout stays machine-readable. `RUST_LOG` overrides the default filter, e.g.
//! `RUST_LOG=asset_search=debug` to see result cache hits and misses.

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

/// Skipped rows, duplicate hashes and copy failures only
pub const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber, filtered by `RUST_LOG` or [`DEFAULT_FILTER`]
pub fn init() -> Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}

/// An unset or blank directive falls back to [`DEFAULT_FILTER`]
fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    let directive = directive.map(str::trim).filter(|d| !d.is_empty()).unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directive).with_context(|| format!("invalid log filter '{directive}'"))
}
