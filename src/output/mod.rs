//! Static site output: JSON data file, rendered HTML page, copied assets.
//!
//! This module contains submodules responsible for writing the normalized
//! collection to its publishable forms:
//!
//! - [`json`]: Serializes the collection to `news.json` for API consumption
//! - [`html`]: Renders the collection into a standalone `index.html`
//! - [`assets`]: Copies a static assets directory into the output tree
//!
//! # Output Structure
//!
//! ```text
//! dist/
//! ├── news.json
//! ├── index.html
//! └── assets/
//!     ├── css/...
//!     ├── js/...
//!     └── img/fallback.jpg
//! ```

pub mod assets;
pub mod html;
pub mod json;

use crate::feed::NormalizedEntry;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create the output directory and verify it accepts writes.
///
/// Called at startup, before any fetching: an unwritable output directory
/// should fail the run immediately, not after minutes of network work.
pub fn ensure_writable_dir(path: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(path)?;
    let probe = path.join(".write_probe");
    std::fs::write(&probe, b"")?;
    std::fs::remove_file(&probe)?;
    Ok(())
}

/// Write the whole site: output directory, `news.json`, `index.html`, and
/// (when present) the static assets tree.
pub fn write_site(
    entries: &[NormalizedEntry],
    out_dir: &Path,
    assets_dir: &Path,
) -> Result<(), OutputError> {
    std::fs::create_dir_all(out_dir)?;

    let json_path = json::write_news_json(entries, out_dir)?;
    tracing::info!(path = %json_path.display(), "Wrote news JSON");

    let html_path = html::write_index_html(entries, out_dir)?;
    tracing::info!(path = %html_path.display(), "Wrote index page");

    let copied = assets::copy_assets(assets_dir, &out_dir.join("assets"))?;
    if copied > 0 {
        tracing::info!(count = copied, "Copied asset files");
    }

    Ok(())
}
