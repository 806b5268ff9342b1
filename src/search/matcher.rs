use regex::{Regex, RegexBuilder};
use rayon::prelude::*;

use crate::error::QueryError;
use crate::models::{Catalog, CatalogRecord};

/// Catalogs at least this large are scanned in parallel
const PARALLEL_THRESHOLD: usize = 4096;

/// Default number of characters shown on each side of a snippet match
pub const DEFAULT_SNIPPET_RADIUS: usize = 30;

/// Trim and lower-case a keyword, rejecting empty input
pub fn normalize_keyword(keyword: &str) -> Result<String, QueryError> {
    let normalized = keyword.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(QueryError::EmptyKeyword);
    }
    Ok(normalized)
}

/// Compiled whole-word, case-insensitive pattern for one keyword
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyKeyword`] for an empty keyword, or
    /// [`QueryError::Pattern`] if the keyword cannot be compiled.
    pub fn new(keyword: &str) -> Result<Self, QueryError> {
        let keyword = normalize_keyword(keyword)?;
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&keyword)))
            .case_insensitive(true)
            .build()
            .map_err(|e| QueryError::Pattern(e.to_string()))?;
        Ok(Self { keyword, pattern })
    }

    /// The normalized keyword this matcher was built from
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, caption: &str) -> bool {
        self.pattern.is_match(caption)
    }

    /// Excerpt of `caption` around the first match, with up to `radius`
    /// characters of context on each side
    pub fn snippet<'a>(&self, caption: &'a str, radius: usize) -> Option<&'a str> {
        let found = self.pattern.find(caption)?;
        let (start, end) = (found.start(), found.end());

        let from = caption[..start].char_indices().rev().take(radius).last().map_or(start, |(i, _)| i);
        let to = caption[end..].char_indices().nth(radius).map_or(caption.len(), |(i, _)| end + i);
        Some(&caption[from..to])
    }
}

/// Find every catalog record whose caption contains `keyword` as a whole word
///
/// Matching is case-insensitive; records keep their original caption casing and
/// are returned in catalog order. An empty result is not an error.
///
/// # Errors
///
/// Returns [`QueryError::EmptyKeyword`] if the keyword is empty after trimming.
pub fn search<'a>(catalog: &'a Catalog, keyword: &str) -> Result<Vec<&'a CatalogRecord>, QueryError> {
    let matcher = KeywordMatcher::new(keyword)?;
    Ok(filter_records(catalog.records(), &matcher))
}

/// Filter records with an already-compiled matcher
pub(crate) fn filter_records<'a>(
    records: &'a [CatalogRecord],
    matcher: &KeywordMatcher,
) -> Vec<&'a CatalogRecord> {
    if records.len() >= PARALLEL_THRESHOLD {
        // collect() into a Vec keeps catalog order
        records.par_iter().filter(|r| matcher.is_match(&r.caption)).collect()
    } else {
        records.iter().filter(|r| matcher.is_match(&r.caption)).collect()
    }
}

/// Check a single caption against a keyword
pub fn caption_matches(caption: &str, keyword: &str) -> bool {
    KeywordMatcher::new(keyword).is_ok_and(|matcher| matcher.is_match(caption))
}

/// Excerpt of `caption` around the first whole-word match of `keyword`
pub fn snippet<'a>(caption: &'a str, keyword: &str, radius: usize) -> Option<&'a str> {
    KeywordMatcher::new(keyword).ok()?.snippet(caption, radius)
}
