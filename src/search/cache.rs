use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::matcher::normalize_keyword;
use crate::error::QueryError;
use crate::models::{CatalogRecord, SearchHit, SearchResult};
use crate::utils::display_path;

/// Memoized search results keyed by normalized keyword
///
/// The cache lives as long as its owner and never evicts. Two callers that miss on the
/// same keyword at the same time may both compute; the first stored value wins and both
/// receive equivalent results.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, SearchResult>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for a keyword, if any
    pub fn get(&self, keyword: &str) -> Option<SearchResult> {
        let key = normalize_keyword(keyword).ok()?;
        self.entries.read().get(&key).cloned()
    }

    /// Return the cached result for `keyword`, computing and storing it on a miss
    ///
    /// `compute` receives the normalized keyword and runs without holding the lock.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyKeyword`] (converted into `E`) for an empty keyword,
    /// or whatever `compute` returns. Failed computations are not cached.
    pub fn get_or_compute<F, E>(&self, keyword: &str, compute: F) -> Result<SearchResult, E>
    where
        F: FnOnce(&str) -> Result<SearchResult, E>,
        E: From<QueryError>,
    {
        let key = normalize_keyword(keyword)?;

        if let Some(hit) = self.entries.read().get(&key) {
            debug!(keyword = %key, "result cache hit");
            return Ok(hit.clone());
        }

        debug!(keyword = %key, "result cache miss");
        let computed = compute(&key)?;

        let mut entries = self.entries.write();
        let stored = entries.entry(key).or_insert(computed);
        Ok(stored.clone())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        normalize_keyword(keyword).is_ok_and(|key| self.entries.read().contains_key(&key))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Project matched records into displayable hits, dropping records with no local file
pub fn project_hits<'a, I>(records: I, route_prefix: &str) -> SearchResult
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    records
        .into_iter()
        .filter_map(|record| {
            let local_path = record.local_path.as_deref()?;
            Some(SearchHit {
                path: display_path(route_prefix, local_path),
                caption: record.caption.clone(),
                content_hash: record.content_hash.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn hits(hashes: &[&str]) -> SearchResult {
        hashes
            .iter()
            .map(|h| SearchHit {
                path: format!("/serve_model/{h}.glb"),
                caption: format!("caption {h}"),
                content_hash: h.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_second_call_skips_compute() {
        let cache = ResultCache::new();
        let calls = Cell::new(0);
        let compute = |_: &str| -> Result<SearchResult, QueryError> {
            calls.set(calls.get() + 1);
            Ok(hits(&["a1", "b2"]))
        };

        let first = cache.get_or_compute("chair", compute).unwrap();
        let second = cache.get_or_compute("chair", compute).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_keys_are_normalized() {
        let cache = ResultCache::new();
        let calls = Cell::new(0);
        let compute = |keyword: &str| -> Result<SearchResult, QueryError> {
            assert_eq!(keyword, "chair");
            calls.set(calls.get() + 1);
            Ok(hits(&["a1"]))
        };

        cache.get_or_compute("Chair", compute).unwrap();
        cache.get_or_compute("  CHAIR ", compute).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("chair"));
    }

    #[test]
    fn test_empty_keyword_never_computes() {
        let cache = ResultCache::new();
        let result: Result<_, QueryError> =
            cache.get_or_compute("  ", |_| panic!("compute must not run"));

        assert_eq!(result.unwrap_err(), QueryError::EmptyKeyword);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_compute_is_not_cached() {
        #[derive(Debug)]
        enum TestError {
            Query,
            Boom,
        }
        impl From<QueryError> for TestError {
            fn from(_: QueryError) -> Self {
                TestError::Query
            }
        }

        let cache = ResultCache::new();
        let result = cache.get_or_compute("lamp", |_| Err(TestError::Boom));
        assert!(matches!(result, Err(TestError::Boom)));
        assert!(!cache.contains("lamp"));
    }

    #[test]
    fn test_concurrent_misses_converge() {
        let cache = Arc::new(ResultCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache
                        .get_or_compute("table", |_| -> Result<SearchResult, QueryError> {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(hits(&["t1", "t2"]))
                        })
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|r| r == &results[0]));
        assert!(calls.load(Ordering::SeqCst) >= 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_project_hits_drops_missing_paths() {
        let records = [
            CatalogRecord {
                content_hash: "a1".to_string(),
                caption: "A red chair".to_string(),
                local_path: Some("glbs/a1.glb".to_string()),
            },
            CatalogRecord {
                content_hash: "b2".to_string(),
                caption: "A blue chair".to_string(),
                local_path: None,
            },
        ];

        let projected = project_hits(&records, "serve_model");
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].path, "/serve_model/glbs/a1.glb");
        assert_eq!(projected[0].content_hash, "a1");
        assert_eq!(projected[0].caption, "A red chair");
    }
}
