use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::error::LoadError;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Column names used to read the two source tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub hash_column: String,
    pub caption_column: String,
    pub path_column: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            hash_column: "sha256".to_string(),
            caption_column: "captions".to_string(),
            path_column: "local_path".to_string(),
        }
    }
}

/// Rows that parsed successfully plus counters for the ones that did not
#[derive(Debug)]
pub(crate) struct TableRows<T> {
    pub rows: Vec<T>,
    pub total: usize,
    pub skipped: usize,
}

/// Read a headed CSV table, handing the requested columns of each row to `parse`.
///
/// Rows that fail to decode or that `parse` rejects are logged and skipped.
/// Returns an error if a column is missing, if more than 50% of rows fail,
/// or after 100 consecutive failures.
pub(crate) fn read_rows<T, F>(
    path: &Path,
    table: &'static str,
    columns: &[&str],
    mut parse: F,
) -> Result<TableRows<T>, LoadError>
where
    F: FnMut(&[&str]) -> Result<T, String>,
{
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path).map_err(|source| {
        LoadError::Open { table, path: path.to_path_buf(), source }
    })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Header { path: path.to_path_buf(), source })?
        .clone();
    let indices = column_indices(&headers, columns, path)?;

    let mut rows = Vec::new();
    let mut total = 0;
    let mut skipped = 0;
    let mut consecutive_errors = 0;
    let mut record = StringRecord::new();

    loop {
        let line = reader.position().line();
        let outcome = match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let fields: Vec<&str> =
                    indices.iter().map(|&i| record.get(i).unwrap_or("")).collect();
                parse(&fields)
            }
            Err(e) => Err(e.to_string()),
        };

        total += 1;
        match outcome {
            Ok(row) => {
                rows.push(row);
                consecutive_errors = 0;
            }
            Err(reason) => {
                warn!(table, line, %reason, "skipping malformed row in {}", path.display());
                skipped += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    return Err(LoadError::ConsecutiveFailures {
                        path: path.to_path_buf(),
                        count: consecutive_errors,
                    });
                }
            }
        }
    }

    if total > 0 && (skipped as f64) / (total as f64) > 0.5 {
        return Err(LoadError::FailureRate { path: path.to_path_buf(), failed: skipped, total });
    }

    Ok(TableRows { rows, total, skipped })
}

fn column_indices(
    headers: &StringRecord,
    columns: &[&str],
    path: &Path,
) -> Result<Vec<usize>, LoadError> {
    columns
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == *column)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        })
        .collect()
}
