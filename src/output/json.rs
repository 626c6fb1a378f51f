//! JSON output: the normalized collection as a `news.json` array.

use crate::feed::NormalizedEntry;
use crate::output::OutputError;
use std::path::{Path, PathBuf};

/// Serialize the collection to `<out_dir>/news.json`.
///
/// The array preserves the collection's order (newest first) and each
/// record's field names match the normalized entry exactly; `published`
/// is `null` for undated entries.
pub fn write_news_json(
    entries: &[NormalizedEntry],
    out_dir: &Path,
) -> Result<PathBuf, OutputError> {
    let path = out_dir.join("news.json");
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
