//! Main-content extraction with snippet fallback.

use scraper::{Html, Selector};
use tracing::debug;

use wrench_domain::traits::SourceExtractor;
use wrench_domain::{SearchResult, SourceDocument};

use crate::config::ExtractConfig;
use crate::fetcher::PageFetcher;

/// Container selectors tried in order; the first one yielding enough text
/// wins. `p` last, as the catch-all for pages without semantic containers.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    "#content",
    ".post-content",
    ".article-content",
    ".entry-content",
    "p",
];

/// Extractor implementing the `SourceExtractor` seam.
pub struct Extractor {
    fetcher: PageFetcher,
    min_extract_len: usize,
}

impl Extractor {
    /// Build an extractor from extraction settings.
    pub fn new(config: &ExtractConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            min_extract_len: config.min_extract_len,
        })
    }
}

impl SourceExtractor for Extractor {
    async fn extract(&self, result: &SearchResult) -> SourceDocument {
        if !result.has_valid_url() {
            return SourceDocument::snippet_fallback(result);
        }

        let Some(html) = self.fetcher.fetch(&result.url).await else {
            return SourceDocument::snippet_fallback(result);
        };

        match extract_main_text(&html) {
            Some(text) if text.chars().count() >= self.min_extract_len => {
                debug!(url = %result.url, chars = text.chars().count(), "extracted page content");
                SourceDocument::extracted(result, text)
            }
            _ => {
                debug!(url = %result.url, "extraction too short, using snippet");
                SourceDocument::snippet_fallback(result)
            }
        }
    }
}

/// Pull main-body text out of an HTML document.
///
/// Returns `None` when no selector yields non-whitespace text.
fn extract_main_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let text = document
            .select(&selector)
            .map(|elem| elem.text().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ");
        let cleaned = normalize_whitespace(&text);
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
    }

    None
}

/// Collapse runs of whitespace into single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
