//! Interactive search loop
//!
//! Reads one keyword per line and prints each match's content hash with a caption
//! excerpt around the keyword. `exit` (any case) or end of input quits.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::error::QueryError;
use crate::search::SearchService;
use crate::search::matcher::{DEFAULT_SNIPPET_RADIUS, KeywordMatcher};
use crate::utils::terminal::sanitize_for_display;

/// Maximum matches printed per query
const MAX_PRINTED_ROWS: usize = 100;

const PROMPT: &str = "Enter a keyword to search (or type 'exit' to quit): ";

pub fn run_shell<R: BufRead, W: Write>(service: &SearchService, input: R, mut output: W) -> Result<()> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read keyword from input")?;
        let keyword = line.trim();

        if keyword.eq_ignore_ascii_case("exit") {
            writeln!(output, "Exiting...")?;
            return Ok(());
        }

        let outcome: Result<_, QueryError> = KeywordMatcher::new(keyword)
            .and_then(|matcher| Ok((service.results(keyword)?, matcher)));
        match outcome {
            Ok((results, matcher)) => {
                let shown = sanitize_for_display(matcher.keyword());
                writeln!(output, "Found {} matching rows for keyword '{}'.", results.len(), shown)?;
                for hit in results.iter().take(MAX_PRINTED_ROWS) {
                    let excerpt =
                        matcher.snippet(&hit.caption, DEFAULT_SNIPPET_RADIUS).unwrap_or(&hit.caption);
                    writeln!(output, "{} {}", hit.content_hash, sanitize_for_display(excerpt))?;
                }
            }
            Err(e) => writeln!(output, "{e}")?,
        }

        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}
