use crate::models::{Page, SearchHit};

/// Number of entries returned when the caller does not ask for a limit
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Slice `results` starting at `offset`, returning at most `limit` entries
///
/// An offset at or past the end yields an empty page rather than an error.
/// `total` always reports the full result length.
pub fn page(results: &[SearchHit], offset: usize, limit: usize) -> Page {
    let start = offset.min(results.len());
    let end = start.saturating_add(limit).min(results.len());

    Page { entries: results[start..end].to_vec(), total: results.len(), offset, limit }
}
