//! feedpage: static news page generator.
//!
//! Ingests a fixed list of RSS/Atom sources, normalizes each feed's recent
//! entries into canonical records (sanitized HTML, plain-text excerpt,
//! stable id, ISO-8601 timestamp, representative image), and emits the
//! collection as `news.json` plus a rendered `index.html`.

pub mod config;
pub mod feed;
pub mod fetch;
pub mod image;
pub mod output;
pub mod sanitize;
