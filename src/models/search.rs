use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A displayable search result entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Public display route of the asset, e.g. `/serve_model/glbs/000-001/a1.glb`
    pub path: String,
    pub caption: String,
    pub content_hash: String,
}

/// Ordered hits for one normalized keyword, shared between the cache and callers
pub type SearchResult = Arc<[SearchHit]>;

/// One slice of a cached result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub entries: Vec<SearchHit>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    /// Offset of the following page, if any entries remain after this one
    pub fn next_offset(&self) -> Option<usize> {
        let end = self.offset.saturating_add(self.entries.len());
        if !self.entries.is_empty() && end < self.total { Some(end) } else { None }
    }
}
