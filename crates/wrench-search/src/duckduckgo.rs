//! DuckDuckGo HTML search adapter.
//!
//! Scrapes `html.duckduckgo.com/html/`, which serves server-rendered result
//! pages without requiring an API key. Result markup has shifted over the
//! years, so parsing tries a couple of selector sets.

use std::time::Duration;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use wrench_domain::traits::SearchProvider;
use wrench_domain::SearchResult;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html";

/// Default per-search timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for the search adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keyword prefixed to queries that do not already mention the domain.
    pub primary_keyword: String,
    /// Lowercase markers that count as "already mentions the domain".
    pub domain_markers: Vec<String>,
    /// Per-search timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            primary_keyword: "PyAnsys".to_string(),
            domain_markers: vec!["pyansys".to_string(), "ansys".to_string()],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Search provider backed by DuckDuckGo's HTML endpoint.
pub struct DuckDuckGo {
    client: reqwest::Client,
    endpoint: String,
    config: SearchConfig,
}

impl DuckDuckGo {
    /// Create an adapter against the public endpoint.
    pub fn new(config: SearchConfig) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(DEFAULT_ENDPOINT, config)
    }

    /// Create an adapter against a custom endpoint (tests point this at a
    /// mock server).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        config: SearchConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            config,
        })
    }

    /// Bias a raw question toward the troubleshooting domain.
    ///
    /// Queries that already mention the domain pass through unchanged;
    /// otherwise the primary keyword is prefixed.
    pub fn augment_query(&self, query: &str) -> String {
        let q = query.trim();
        if q.is_empty() {
            return q.to_string();
        }
        let lower = q.to_lowercase();
        if self
            .config
            .domain_markers
            .iter()
            .any(|marker| lower.contains(marker.as_str()))
        {
            return q.to_string();
        }
        format!("{} {}", self.config.primary_keyword, q)
    }

    async fn fetch_results_page(&self, query: &str) -> Result<String, reqwest::Error> {
        let url = format!("{}/?q={}", self.endpoint, urlencoding::encode(query));
        let response = self
            .client
            .get(&url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await?
            .error_for_status()?;
        response.text().await
    }
}

impl SearchProvider for DuckDuckGo {
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let augmented = self.augment_query(query);
        debug!(query = %augmented, "issuing search");

        let html = match self.fetch_results_page(&augmented).await {
            Ok(html) => html,
            Err(e) => {
                // Transient provider failures are not fatal: an empty list
                // surfaces as NoResults upstream.
                warn!(error = %e, "search request failed");
                return Vec::new();
            }
        };

        let mut results = parse_results(&html);
        results.truncate(max_results);
        debug!(count = results.len(), "search complete");
        results
    }
}

/// Parse a DuckDuckGo HTML results page into ranked results.
///
/// Tries selector sets for both current and older result markup; the first
/// set that yields anything wins. Malformed and duplicate URLs are dropped.
fn parse_results(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let selector_sets = [
        (".result", ".result__title a", ".result__snippet"),
        (".web-result", ".result__a", ".result__snippet"),
        (".links_main", "h2 a", ".snippet"),
    ];

    let mut results: Vec<SearchResult> = Vec::new();

    for (result_sel, title_sel, snippet_sel) in selector_sets {
        let (Ok(result_selector), Ok(title_selector), Ok(snippet_selector)) = (
            Selector::parse(result_sel),
            Selector::parse(title_sel),
            Selector::parse(snippet_sel),
        ) else {
            continue;
        };

        for element in document.select(&result_selector) {
            let Some(title_elem) = element.select(&title_selector).next() else {
                continue;
            };
            let title = title_elem.text().collect::<String>().trim().to_string();
            let href = title_elem.value().attr("href").unwrap_or("").to_string();

            let snippet = element
                .select(&snippet_selector)
                .next()
                .map(|elem| elem.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            let Some(url) = normalize_href(&href) else {
                continue;
            };
            if title.is_empty() || results.iter().any(|r| r.url == url) {
                continue;
            }

            results.push(SearchResult {
                title,
                url,
                snippet,
            });
        }

        if !results.is_empty() {
            break;
        }
    }

    results
}

/// Absolute-ify protocol-relative links and reject anything that does not
/// parse as a URL.
fn normalize_href(href: &str) -> Option<String> {
    let candidate = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with("http") {
        href.to_string()
    } else {
        return None;
    };
    Url::parse(&candidate).ok().map(|_| candidate)
}
