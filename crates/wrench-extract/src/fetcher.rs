//! Certificate-relaxed page fetching.

use std::time::Duration;

use tracing::debug;

use crate::config::ExtractConfig;

/// Browser-like User-Agent; several community forums refuse default
/// library agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// HTTP client for fetching source pages.
///
/// Failures are not distinguished at this layer: anything other than a 2xx
/// body within the timeout yields `None`, and the caller degrades to the
/// snippet.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher from extraction settings.
    pub fn new(config: &ExtractConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch a page body, or `None` on any failure.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(%url, error = %e, "fetch failed");
                return None;
            }
        };

        if response.status().as_u16() >= 400 {
            debug!(%url, status = %response.status(), "fetch returned error status");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(%url, error = %e, "body read failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(timeout_secs: u64) -> PageFetcher {
        PageFetcher::new(&ExtractConfig {
            timeout_secs,
            ..ExtractConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let body = fetcher(5).fetch(&format!("{}/page", server.uri())).await;
        assert_eq!(body.as_deref(), Some("<html>ok</html>"));
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(fetcher(5).fetch(&format!("{}/missing", server.uri())).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("slow")
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        assert!(fetcher(1).fetch(&format!("{}/slow", server.uri())).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_none() {
        assert!(fetcher(1).fetch("http://127.0.0.1:1/nothing").await.is_none());
    }
}
