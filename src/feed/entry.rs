//! Entry data model: the loosely-populated shape feed parsing delivers and
//! the canonical record the pipeline emits.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One feed item as delivered by the parser, every field optional.
///
/// Feeds in the wild omit almost anything, so consumers must branch on
/// presence explicitly rather than assume a field exists.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Content variants in feed order; the first non-empty value wins.
    pub content: Vec<ContentVariant>,
    pub summary: Option<String>,
    pub published: Option<NaiveDateTime>,
    pub updated: Option<NaiveDateTime>,
}

/// One variant of an entry's full content. The value may still be absent
/// even when the variant itself is present.
#[derive(Debug, Clone)]
pub struct ContentVariant {
    pub value: Option<String>,
}

impl From<feed_rs::model::Entry> for RawEntry {
    fn from(entry: feed_rs::model::Entry) -> Self {
        Self {
            title: entry.title.map(|t| t.content),
            link: entry.links.first().map(|l| l.href.clone()),
            content: entry
                .content
                .map(|c| ContentVariant { value: c.body })
                .into_iter()
                .collect(),
            summary: entry.summary.map(|s| s.content),
            published: entry.published.map(|dt| dt.naive_utc()),
            updated: entry.updated.map(|dt| dt.naive_utc()),
        }
    }
}

/// Canonical record for one feed entry. Field names match the emitted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub image: String,
    pub summary: String,
    pub content: String,
    pub published: Option<String>,
    pub has_full_content: bool,
}

/// Deterministic content-addressed identifier for an entry link.
///
/// Identical links always hash to the same id, which lets downstream
/// consumers deduplicate across runs.
pub fn entry_id(link: &str) -> String {
    let hash = Sha256::digest(link.as_bytes());
    format!("{:x}", hash)
}

/// ISO-8601 timestamp for an entry: published preferred, updated as the
/// fallback, absent when the feed provided neither.
pub fn iso_timestamp(entry: &RawEntry) -> Option<String> {
    entry
        .published
        .or(entry.updated)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}
