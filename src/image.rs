//! Representative-image resolution for linked article pages.
//!
//! The page an entry links to usually advertises an illustration through
//! Open Graph metadata; failing that, the site favicon is better than
//! nothing. Resolution is strictly best-effort: one GET, one parse, and any
//! failure degrades to `None` with a warning. The caller substitutes the
//! configured fallback image.

use crate::fetch::{read_limited_bytes, BodyError, MAX_BODY_SIZE};
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
enum ResolveError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("response too large")]
    ResponseTooLarge,
}

impl From<BodyError> for ResolveError {
    fn from(e: BodyError) -> Self {
        match e {
            BodyError::Network(e) => ResolveError::Network(e),
            BodyError::TooLarge => ResolveError::ResponseTooLarge,
        }
    }
}

/// Fetches article pages and extracts a representative image URL.
pub struct ImageResolver {
    client: reqwest::Client,
    timeout: Duration,
}

impl ImageResolver {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Resolve a representative image for `page_url`.
    ///
    /// Never fails: network errors, timeouts, and pages without usable
    /// metadata all yield `None`.
    pub async fn resolve(&self, page_url: &str) -> Option<String> {
        match self.fetch_page(page_url).await {
            Ok(body) => find_page_image(&body),
            Err(e) => {
                tracing::warn!(url = %page_url, error = %e, "Image resolution failed");
                None
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ResolveError> {
        // Timeout spans the body read too, and the body is size-capped.
        let bytes = tokio::time::timeout(self.timeout, async {
            let response = self.client.get(url).send().await?;
            Ok::<_, ResolveError>(read_limited_bytes(response, MAX_BODY_SIZE).await?)
        })
        .await
        .map_err(|_| ResolveError::Timeout)??;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Extract an image URL from page markup: `og:image` first, favicon second.
fn find_page_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let og_image = Selector::parse(r#"meta[property="og:image"]"#).ok()?;
    if let Some(content) = document
        .select(&og_image)
        .filter_map(|el| el.value().attr("content"))
        .find(|v| !v.trim().is_empty())
    {
        return Some(content.to_string());
    }

    let icon = Selector::parse(r#"link[rel~="icon"]"#).ok()?;
    document
        .select(&icon)
        .filter_map(|el| el.value().attr("href"))
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn og_image_preferred() {
        let html = r#"<html><head>
            <link rel="icon" href="/favicon.ico">
            <meta property="og:image" content="https://example.com/hero.jpg">
        </head></html>"#;
        assert_eq!(
            find_page_image(html),
            Some("https://example.com/hero.jpg".to_string())
        );
    }

    #[test]
    fn icon_used_when_no_og_image() {
        let html = r#"<html><head><link rel="icon" href="/favicon.ico"></head></html>"#;
        assert_eq!(find_page_image(html), Some("/favicon.ico".to_string()));
    }

    #[test]
    fn shortcut_icon_rel_list_matches() {
        let html = r#"<html><head><link rel="shortcut icon" href="/fav.png"></head></html>"#;
        assert_eq!(find_page_image(html), Some("/fav.png".to_string()));
    }

    #[test]
    fn no_image_yields_none() {
        assert_eq!(find_page_image("<html><body>No image here</body></html>"), None);
    }

    #[test]
    fn empty_og_content_skipped() {
        let html = r#"<html><head>
            <meta property="og:image" content="">
            <link rel="icon" href="/favicon.ico">
        </head></html>"#;
        assert_eq!(find_page_image(html), Some("/favicon.ico".to_string()));
    }

    #[tokio::test]
    async fn network_error_resolves_to_none() {
        // Port from a server that was dropped: connection refused.
        let server = MockServer::start().await;
        let url = server.uri();
        drop(server);

        let resolver = ImageResolver::new(reqwest::Client::new(), Duration::from_secs(2));
        assert_eq!(resolver.resolve(&url).await, None);
    }

    #[tokio::test]
    async fn resolves_from_live_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><head><meta property="og:image" content="https://cdn.example.com/a.jpg"></head></html>"#,
            ))
            .mount(&server)
            .await;

        let resolver = ImageResolver::new(reqwest::Client::new(), Duration::from_secs(5));
        let url = format!("{}/story", server.uri());
        assert_eq!(
            resolver.resolve(&url).await,
            Some("https://cdn.example.com/a.jpg".to_string())
        );
    }
}
