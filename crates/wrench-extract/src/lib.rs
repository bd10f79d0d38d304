//! Wrench Content Extraction Layer
//!
//! Fetches pages behind search results and extracts their main-body text.
//! Extraction failure is never fatal: any failure (network error, bad
//! status, timeout, non-article content) degrades the document to the
//! search snippet, tagged `Origin::SnippetFallback` so downstream code can
//! reason about source trust.

#![warn(missing_docs)]

pub mod config;
pub mod extractor;
pub mod fetcher;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use wrench_domain::traits::SourceExtractor;
use wrench_domain::{SearchResult, SourceDocument};

pub use config::ExtractConfig;
pub use extractor::Extractor;
pub use fetcher::PageFetcher;

/// Mock extractor for deterministic testing.
///
/// Returns pre-seeded extracted text per URL and snippet fallback for
/// everything else, with a call counter for asserting that the decline and
/// no-results paths perform zero extractions.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    extracted: HashMap<String, String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockExtractor {
    /// A mock where every extraction degrades to snippet fallback.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Seed successful extraction text for a URL.
    pub fn with_text(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.extracted.insert(url.into(), text.into());
        self
    }

    /// Number of times `extract` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl SourceExtractor for MockExtractor {
    async fn extract(&self, result: &SearchResult) -> SourceDocument {
        *self.call_count.lock().unwrap() += 1;
        match self.extracted.get(&result.url) {
            Some(text) => SourceDocument::extracted(result, text.clone()),
            None => SourceDocument::snippet_fallback(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrench_domain::Origin;

    fn result(url: &str, snippet: &str) -> SearchResult {
        SearchResult {
            title: "t".into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }

    #[tokio::test]
    async fn test_mock_extracts_seeded_urls() {
        let mock = MockExtractor::default().with_text("https://a.example.com", "body");
        let doc = mock.extract(&result("https://a.example.com", "snip")).await;
        assert_eq!(doc.origin, Origin::Extracted);
        assert_eq!(doc.text, "body");
    }

    #[tokio::test]
    async fn test_mock_falls_back_for_unseeded_urls() {
        let mock = MockExtractor::failing();
        let doc = mock.extract(&result("https://b.example.com", "snip")).await;
        assert_eq!(doc.origin, Origin::SnippetFallback);
        assert_eq!(doc.text, "snip");
        assert_eq!(mock.call_count(), 1);
    }
}
