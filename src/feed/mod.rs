//! Feed ingestion: raw entry model, content extraction, and the
//! normalization pipeline.
//!
//! The module is organized into three submodules:
//!
//! - [`entry`] - The loosely-populated [`entry::RawEntry`] delivered by
//!   `feed-rs` parsing and the canonical [`entry::NormalizedEntry`] output
//! - [`extract`] - Selecting the richest content representation an entry
//!   offers (full content over summary over placeholder)
//! - [`pipeline`] - Per-source fetching, per-entry normalization, failure
//!   isolation, and the final global sort

pub mod entry;
pub mod extract;
pub mod pipeline;

pub use entry::{entry_id, NormalizedEntry, RawEntry};
pub use extract::{extract_content, NO_CONTENT_PLACEHOLDER};
pub use pipeline::{Pipeline, PipelineOptions, SourceError};
