//! Search results and the source documents derived from them.

use url::Url;

/// One ranked hit from the search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Result title as shown on the results page.
    pub title: String,
    /// Absolute URL of the result. Must parse as a URL; the provider drops
    /// anything that does not.
    pub url: String,
    /// Short preview text. May be empty; used as the fallback source when
    /// full-page extraction fails.
    pub snippet: String,
}

impl SearchResult {
    /// Whether the URL field is a well-formed absolute URL.
    pub fn has_valid_url(&self) -> bool {
        Url::parse(&self.url).is_ok()
    }
}

/// Provenance of a source document's text.
///
/// Carried as data rather than inferred from control flow, so downstream
/// consumers can weight trust without knowing how extraction went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Full-page main-content extraction succeeded.
    Extracted,
    /// Extraction failed; the text is the search result's snippet.
    SnippetFallback,
}

/// Text obtained for one search result, with provenance.
///
/// Created during the extract stage, consumed by assembly, discarded with
/// the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Title carried over from the originating search result.
    pub title: String,
    /// URL the text was (or would have been) fetched from.
    pub url: String,
    /// Extracted page text, or the snippet on fallback.
    pub text: String,
    /// Where the text came from.
    pub origin: Origin,
}

impl SourceDocument {
    /// Build a document from successful page extraction.
    pub fn extracted(result: &SearchResult, text: String) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            text,
            origin: Origin::Extracted,
        }
    }

    /// Build a degraded document from the search result's snippet.
    pub fn snippet_fallback(result: &SearchResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            text: result.snippet.clone(),
            origin: Origin::SnippetFallback,
        }
    }

    /// Whether the document carries any usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> SearchResult {
        SearchResult {
            title: "MAPDL licensing guide".into(),
            url: "https://docs.example.com/mapdl/licensing".into(),
            snippet: "Set ANSYSLMD_LICENSE_FILE before launching.".into(),
        }
    }

    #[test]
    fn test_url_validity() {
        assert!(sample_result().has_valid_url());

        let bad = SearchResult {
            url: "not a url".into(),
            ..sample_result()
        };
        assert!(!bad.has_valid_url());
    }

    #[test]
    fn test_snippet_fallback_carries_provenance() {
        let result = sample_result();
        let doc = SourceDocument::snippet_fallback(&result);
        assert_eq!(doc.origin, Origin::SnippetFallback);
        assert_eq!(doc.text, result.snippet);
        assert_eq!(doc.url, result.url);
    }

    #[test]
    fn test_extracted_document() {
        let result = sample_result();
        let doc = SourceDocument::extracted(&result, "Full article body.".into());
        assert_eq!(doc.origin, Origin::Extracted);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_empty_fallback_is_empty() {
        let result = SearchResult {
            snippet: "  ".into(),
            ..sample_result()
        };
        assert!(SourceDocument::snippet_fallback(&result).is_empty());
    }
}
