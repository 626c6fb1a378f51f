//! Content extraction: choose the richest representation a raw entry offers.

use crate::feed::entry::RawEntry;

/// Placeholder used when an entry carries neither content nor summary.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content available.";

/// Select the content HTML for an entry and report whether full content
/// (as opposed to just the summary) was available.
///
/// Precedence, in order:
/// 1. the first content variant with a non-empty value,
/// 2. the summary,
/// 3. a fixed placeholder.
///
/// `has_full_content` is true only for case 1, and only when the value is
/// distinct from the summary. An entry with content but no summary to
/// compare against counts as full content.
///
/// The returned HTML is untrusted; callers must sanitize it before display.
pub fn extract_content(entry: &RawEntry) -> (String, bool) {
    if let Some(value) = entry
        .content
        .first()
        .and_then(|variant| variant.value.as_deref())
        .filter(|value| !value.is_empty())
    {
        let has_full = entry.summary.as_deref() != Some(value);
        return (value.to_string(), has_full);
    }

    if let Some(summary) = entry.summary.as_deref() {
        return (summary.to_string(), false);
    }

    (NO_CONTENT_PLACEHOLDER.to_string(), false)
}
