use std::path::{Path, PathBuf};

use anyhow::Result;

use super::cache::{ResultCache, project_hits};
use super::matcher::{KeywordMatcher, filter_records};
use super::pager::{DEFAULT_PAGE_SIZE, page};
use crate::error::QueryError;
use crate::models::{Catalog, Page, SearchResult};
use crate::utils::{DEFAULT_ROUTE_PREFIX, resolve_asset_path};

/// Entry point for keyword queries: catalog, result cache and route prefix in one place
#[derive(Debug)]
pub struct SearchService {
    catalog: Catalog,
    cache: ResultCache,
    route_prefix: String,
    page_size: usize,
}

impl SearchService {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_cache(catalog, ResultCache::new())
    }

    pub fn with_cache(catalog: Catalog, cache: ResultCache) -> Self {
        Self {
            catalog,
            cache,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_route_prefix(mut self, route_prefix: impl Into<String>) -> Self {
        self.route_prefix = route_prefix.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Full ordered result list for a keyword, served from the cache when possible
    pub fn results(&self, keyword: &str) -> Result<SearchResult, QueryError> {
        self.cache.get_or_compute(keyword, |normalized| {
            let matcher = KeywordMatcher::new(normalized)?;
            let matched = filter_records(self.catalog.records(), &matcher);
            Ok(project_hits(matched, &self.route_prefix))
        })
    }

    /// One page of results; `offset` defaults to 0 and `limit` to the configured page size
    pub fn search(
        &self,
        keyword: &str,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Page, QueryError> {
        let results = self.results(keyword)?;
        Ok(page(&results, offset.unwrap_or(0), limit.unwrap_or(self.page_size)))
    }

    /// Filesystem location of an asset given its display route
    pub fn resolve_asset(&self, dataset_root: &Path, display: &str) -> Result<PathBuf> {
        resolve_asset_path(dataset_root, &self.route_prefix, display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogRecord;

    fn catalog() -> Catalog {
        let rows = [
            ("a1", "A red chair", Some("glbs/a1.glb")),
            ("b2", "chairs and tables", Some("glbs/b2.glb")),
            ("c3", "Chair, not downloaded", None),
            ("d4", "Office chair", Some("glbs/d4.glb")),
        ];
        Catalog::from_records(rows.into_iter().map(|(hash, caption, path)| CatalogRecord {
            content_hash: hash.to_string(),
            caption: caption.to_string(),
            local_path: path.map(str::to_string),
        }))
    }

    #[test]
    fn test_search_projects_downloaded_matches() {
        let service = SearchService::new(catalog());
        let page = service.search("chair", None, None).unwrap();

        assert_eq!(page.total, 2);
        let hashes: Vec<_> = page.entries.iter().map(|e| e.content_hash.as_str()).collect();
        assert_eq!(hashes, vec!["a1", "d4"]);
        assert_eq!(page.entries[0].path, "/serve_model/glbs/a1.glb");
    }

    #[test]
    fn test_search_caches_results() {
        let service = SearchService::new(catalog());
        service.search("CHAIR", None, None).unwrap();

        assert!(service.cache().contains("chair"));
        assert_eq!(service.cache().len(), 1);
    }

    #[test]
    fn test_search_pagination() {
        let service = SearchService::new(catalog()).with_page_size(1);
        let second = service.search("chair", Some(1), None).unwrap();

        assert_eq!(second.entries.len(), 1);
        assert_eq!(second.entries[0].content_hash, "d4");
        assert_eq!(second.limit, 1);
    }

    #[test]
    fn test_search_empty_keyword() {
        let service = SearchService::new(catalog());
        assert_eq!(service.search("", None, None).unwrap_err(), QueryError::EmptyKeyword);
    }

    #[test]
    fn test_custom_route_prefix() {
        let service = SearchService::new(catalog()).with_route_prefix("assets");
        let results = service.results("office").unwrap();

        assert_eq!(results[0].path, "/assets/glbs/d4.glb");
        let resolved = service.resolve_asset(Path::new("/data"), &results[0].path).unwrap();
        assert_eq!(resolved, PathBuf::from("/data/glbs/d4.glb"));
    }
}
