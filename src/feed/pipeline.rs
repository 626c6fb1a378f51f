//! The feed pipeline: fetch every configured source once, normalize its
//! recent entries, and produce one globally sorted collection.
//!
//! Failure isolation is the contract here. A dead host, a bozo feed, or an
//! entry missing required fields costs exactly that source or entry; the
//! run always yields a (possibly partial, possibly empty) collection.

use crate::feed::entry::{entry_id, iso_timestamp, NormalizedEntry, RawEntry};
use crate::feed::extract::extract_content;
use crate::fetch::{read_limited_bytes, BodyError, MAX_BODY_SIZE};
use crate::image::ImageResolver;
use crate::sanitize::{self, Sanitizer};
use std::time::Duration;
use thiserror::Error;

/// Maximum plain-text summary length before the ellipsis is appended.
const SUMMARY_MAX_CHARS: usize = 300;

/// Browser-like User-Agent; some feed hosts reject unknown clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36";

/// Errors that remove a whole source from the run.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Unreachable(#[from] reqwest::Error),
    /// Fetch exceeded the configured timeout
    #[error("request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the size limit
    #[error("response too large")]
    ResponseTooLarge,
    /// Response body is not parseable RSS/Atom (the bozo condition)
    #[error("malformed feed: {0}")]
    Malformed(String),
}

impl From<BodyError> for SourceError {
    fn from(e: BodyError) -> Self {
        match e {
            BodyError::Network(e) => SourceError::Unreachable(e),
            BodyError::TooLarge => SourceError::ResponseTooLarge,
        }
    }
}

/// Errors that remove a single entry from its source.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("entry has no title")]
    MissingTitle,
    #[error("entry has no link")]
    MissingLink,
}

/// Immutable pipeline configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Entries kept per source, in the feed's native (most-recent-first) order.
    pub max_entries_per_source: usize,
    /// Image path substituted when resolution finds nothing.
    pub fallback_image: String,
    pub feed_timeout: Duration,
    pub image_timeout: Duration,
    pub user_agent: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_entries_per_source: 5,
            fallback_image: "assets/img/fallback.jpg".to_string(),
            feed_timeout: Duration::from_secs(30),
            image_timeout: Duration::from_secs(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// Fetches and normalizes all configured feed sources.
pub struct Pipeline {
    client: reqwest::Client,
    sanitizer: Sanitizer,
    resolver: ImageResolver,
    options: PipelineOptions,
}

impl Pipeline {
    /// Build a pipeline and its shared HTTP client.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(options: PipelineOptions) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.clone())
            .build()?;
        let resolver = ImageResolver::new(client.clone(), options.image_timeout);
        Ok(Self {
            client,
            sanitizer: Sanitizer::new(),
            resolver,
            options,
        })
    }

    /// Process every source in order and return the sorted collection.
    ///
    /// Never fails as a whole: per-source and per-entry errors are logged
    /// and skipped. An empty source list yields an empty collection.
    pub async fn run(&self, sources: &[String]) -> Vec<NormalizedEntry> {
        let mut all = Vec::new();

        for url in sources {
            tracing::info!(url = %url, "Reading feed");
            match self.process_source(url).await {
                Ok(mut entries) => {
                    tracing::info!(url = %url, count = entries.len(), "Feed processed");
                    all.append(&mut entries);
                }
                Err(e @ SourceError::Malformed(_)) => {
                    tracing::warn!(url = %url, error = %e, "Skipping malformed feed");
                }
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Skipping unreachable feed");
                }
            }
        }

        sort_newest_first(&mut all);
        all
    }

    async fn process_source(&self, url: &str) -> Result<Vec<NormalizedEntry>, SourceError> {
        // The timeout covers the whole fetch, body read included, so a
        // server dripping bytes cannot stall the run.
        let bytes = tokio::time::timeout(self.options.feed_timeout, async {
            let response = self.client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(SourceError::HttpStatus(response.status().as_u16()));
            }
            Ok(read_limited_bytes(response, MAX_BODY_SIZE).await?)
        })
        .await
        .map_err(|_| SourceError::Timeout)??;

        let feed = feed_rs::parser::parse(bytes.as_slice())
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let mut entries = Vec::new();
        for parsed in feed
            .entries
            .into_iter()
            .take(self.options.max_entries_per_source)
        {
            let raw = RawEntry::from(parsed);
            match self.normalize(raw).await {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Skipping incomplete entry");
                }
            }
        }
        Ok(entries)
    }

    /// Normalize one raw entry into its canonical record.
    ///
    /// # Errors
    ///
    /// Missing `title` or `link` fails the entry; every other absent field
    /// degrades to a default.
    async fn normalize(&self, raw: RawEntry) -> Result<NormalizedEntry, EntryError> {
        let title = raw.title.clone().ok_or(EntryError::MissingTitle)?;
        let link = raw.link.clone().ok_or(EntryError::MissingLink)?;

        let (content_html, has_full_content) = extract_content(&raw);
        let content = self.sanitizer.clean(&content_html);
        let summary = sanitize::excerpt(&sanitize::plain_text(&content), SUMMARY_MAX_CHARS);

        let image = match self.resolver.resolve(&link).await {
            Some(found) if !found.trim().is_empty() => found,
            _ => self.options.fallback_image.clone(),
        };

        Ok(NormalizedEntry {
            id: entry_id(&link),
            title,
            image,
            summary,
            content,
            published: iso_timestamp(&raw),
            has_full_content,
            link,
        })
    }
}

/// Sort a collection newest first. Undated entries sort as the empty
/// string, after every dated one.
pub fn sort_newest_first(entries: &mut [NormalizedEntry]) {
    entries.sort_by(|a, b| {
        let ka = a.published.as_deref().unwrap_or("");
        let kb = b.published.as_deref().unwrap_or("");
        kb.cmp(ka)
    });
}
