//! Keyword search over the catalog
//!
//! A query flows through three stages:
//!
//! - [`matcher`] - whole-word, case-insensitive caption filtering
//! - [`cache`] - memoizes the projected result list per normalized keyword
//! - [`pager`] - offset/limit views over a cached result list
//!
//! [`SearchService`] wires the three together behind a single `search` call.
//!
//! # Matching Policy
//!
//! A keyword matches only as a whole word: `"cat"` does not match `"category"` and
//! `"chair"` does not match `"chairs"`. Earlier tooling for this dataset matched plain
//! substrings; whole-word matching is the deliberate behavior here.

pub mod cache;
pub mod matcher;
pub mod pager;
pub mod service;

pub use cache::{ResultCache, project_hits};
pub use matcher::{KeywordMatcher, caption_matches, normalize_keyword, search, snippet};
pub use pager::{DEFAULT_PAGE_SIZE, page};
pub use service::SearchService;
