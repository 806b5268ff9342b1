use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

use super::shell::run_shell;
use super::{Cli, Commands};
use crate::config::Config;
use crate::models::{ExportReport, Page, SelectedEntry};
use crate::search::SearchService;
use crate::utils::format_path_with_tilde;
use crate::utils::terminal::sanitize_for_display;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = cli.dataset.to_config()?;
    match command {
        Commands::Search { keyword, offset, limit, json } => {
            let service = config.search_service()?;
            search(&service, keyword, *offset, *limit, *json)?;
        }
        Commands::Export { keyword, hashes, all, selection, json } => {
            let selected = match selection {
                Some(path) => read_selection(path)?,
                None => {
                    let service = config.search_service()?;
                    select_from_results(&service, keyword, hashes, *all)?
                }
            };
            export(&config, keyword, &selected, *json)?;
        }
        Commands::Stats => {
            show_stats(&config)?;
        }
        Commands::Shell => {
            let service = config.search_service()?;
            let stdin = io::stdin();
            run_shell(&service, stdin.lock(), io::stdout().lock())?;
        }
        Commands::Resolve { display_path } => {
            let path = crate::utils::resolve_asset_path(
                &config.dataset_root,
                &config.route_prefix,
                display_path,
            )?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn search(
    service: &SearchService,
    keyword: &str,
    offset: usize,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let page = service.search(keyword, Some(offset), limit)?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &page).context("Failed to serialize results")?;
        writeln!(out)?;
    } else {
        print_page(&mut out, keyword, &page)?;
    }
    Ok(())
}

fn print_page(out: &mut impl Write, keyword: &str, page: &Page) -> io::Result<()> {
    if page.total == 0 {
        writeln!(out, "No results for '{}'", sanitize_for_display(keyword))?;
        return Ok(());
    }

    if page.entries.is_empty() {
        writeln!(out, "No results at offset {} ({} total)", page.offset, page.total)?;
        return Ok(());
    }

    writeln!(
        out,
        "Results {}-{} of {} for '{}'",
        page.offset + 1,
        page.offset + page.entries.len(),
        page.total,
        sanitize_for_display(keyword)
    )?;
    for entry in &page.entries {
        writeln!(out, "{}  {}", entry.content_hash, entry.path)?;
        writeln!(out, "    {}", sanitize_for_display(&entry.caption))?;
    }
    if let Some(next) = page.next_offset() {
        writeln!(out, "More results: --offset {next}")?;
    }
    Ok(())
}

/// Pick entries out of the keyword's result list by content hash
fn select_from_results(
    service: &SearchService,
    keyword: &str,
    hashes: &[String],
    all: bool,
) -> Result<Vec<SelectedEntry>> {
    let results = service.results(keyword)?;
    if all {
        return Ok(results.iter().cloned().map(SelectedEntry::from).collect());
    }

    let wanted: HashSet<&str> = hashes.iter().map(String::as_str).collect();
    let selected: Vec<SelectedEntry> = results
        .iter()
        .filter(|hit| wanted.contains(hit.content_hash.as_str()))
        .cloned()
        .map(SelectedEntry::from)
        .collect();

    let found: HashSet<&str> = selected.iter().map(|e| e.content_hash.as_str()).collect();
    let missing: Vec<&str> = hashes.iter().map(String::as_str).filter(|h| !found.contains(h)).collect();
    if !missing.is_empty() {
        bail!("Not among the results for '{}': {}", keyword, missing.join(", "));
    }

    Ok(selected)
}

fn read_selection(path: &Path) -> Result<Vec<SelectedEntry>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read selection file: {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to parse selection JSON")
}

fn export(config: &Config, keyword: &str, selected: &[SelectedEntry], json: bool) -> Result<()> {
    let manager = config.export_manager();
    let report = manager.export_selection(keyword, selected)?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to serialize report")?;
        writeln!(out)?;
    } else {
        print_report(&mut out, &report)?;
    }
    Ok(())
}

fn print_report(out: &mut impl Write, report: &ExportReport) -> io::Result<()> {
    writeln!(
        out,
        "Exported {}/{} models to {}",
        report.succeeded,
        report.requested,
        format_path_with_tilde(&report.batch_dir)
    )?;
    writeln!(out, "Batch: {}", report.batch)?;
    writeln!(out, "Manifest: {}", format_path_with_tilde(&report.manifest_path))?;
    if !report.failures.is_empty() {
        writeln!(out, "Failed:")?;
        for failure in &report.failures {
            writeln!(out, "  {}: {}", failure.source, failure.reason)?;
        }
    }
    Ok(())
}

fn show_stats(config: &Config) -> Result<()> {
    let catalog = config.load_catalog()?;
    let stats = catalog.stats();
    let summary = catalog.summary();

    println!("Asset Catalog Statistics");
    println!("========================");
    println!("Total records: {}", stats.total);
    println!("  Downloaded: {}", stats.downloaded);
    println!("  With captions: {}", stats.captioned);
    println!("Metadata rows: {} ({} skipped)", summary.metadata_rows, summary.skipped_rows);
    println!("Manifest rows: {}", summary.manifest_rows);
    println!("Duplicate hashes ignored: {}", summary.duplicate_hashes);
    println!();
    println!("Dataset root: {}", format_path_with_tilde(&config.dataset_root));
    println!("Output root: {}", format_path_with_tilde(&config.output_root));

    Ok(())
}
