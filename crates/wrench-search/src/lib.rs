//! Wrench Search Provider Layer
//!
//! Adapters implementing the `SearchProvider` trait from `wrench-domain`.
//!
//! # Providers
//!
//! - `MockSearch`: deterministic mock for testing
//! - `DuckDuckGo`: scrapes the DuckDuckGo HTML endpoint
//!
//! The seam is deliberately infallible: a provider that fails returns an
//! empty list and logs why, so the state machine sees `NoResults` rather
//! than a hard failure.

#![warn(missing_docs)]

pub mod duckduckgo;

use std::sync::{Arc, Mutex};

use wrench_domain::traits::SearchProvider;
use wrench_domain::SearchResult;

pub use duckduckgo::{DuckDuckGo, SearchConfig};

/// Mock search provider for deterministic testing.
///
/// Returns a fixed result list without any network calls and counts how
/// often it was invoked, so tests can assert that the decline path makes
/// zero search calls.
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    results: Vec<SearchResult>,
    call_count: Arc<Mutex<usize>>,
}

impl MockSearch {
    /// A mock returning the given results for every query.
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// A mock that always returns zero results.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of times `search` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl SearchProvider for MockSearch {
    async fn search(&self, _query: &str, max_results: usize) -> Vec<SearchResult> {
        *self.call_count.lock().unwrap() += 1;
        self.results.iter().take(max_results).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str) -> SearchResult {
        SearchResult {
            title: url.to_string(),
            url: url.to_string(),
            snippet: String::new(),
        }
    }

    #[tokio::test]
    async fn test_mock_respects_max_results() {
        let mock = MockSearch::new(vec![
            result("https://a.example.com"),
            result("https://b.example.com"),
            result("https://c.example.com"),
        ]);
        let hits = mock.search("anything", 2).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_counts_calls_across_clones() {
        let mock = MockSearch::empty();
        let clone = mock.clone();
        clone.search("q", 5).await;
        assert_eq!(mock.call_count(), 1);
    }
}
