//! Run configuration: the feed source list and optional TOML overrides.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! The source list is the one input the run cannot proceed without; its
//! absence is the only fatal configuration error.

use crate::feed::PipelineOptions;
use crate::feed::pipeline::BROWSER_USER_AGENT;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read source list {path}: {source}")]
    SourceList {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Optional tuning knobs for the pipeline.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to the defaults: five entries per
/// source, a 10 second image timeout, and the bundled fallback image path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entries kept per source.
    pub max_entries_per_source: usize,
    /// Image path substituted when resolution finds nothing.
    pub fallback_image: String,
    /// Feed fetch timeout in seconds.
    pub feed_timeout_secs: u64,
    /// Article page fetch timeout for image resolution, in seconds.
    pub image_timeout_secs: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries_per_source: 5,
            fallback_image: "assets/img/fallback.jpg".to_string(),
            feed_timeout_secs: 30,
            image_timeout_secs: 10,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_entries_per_source: self.max_entries_per_source,
            fallback_image: self.fallback_image.clone(),
            feed_timeout: Duration::from_secs(self.feed_timeout_secs),
            image_timeout: Duration::from_secs(self.image_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Read the ordered feed source list: one URL per line, blank lines and
/// surrounding whitespace ignored. Lines that do not parse as URLs are
/// kept (the pipeline will skip them as unreachable) but logged.
pub fn load_sources(path: &Path) -> Result<Vec<String>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::SourceList {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if url::Url::parse(line).is_err() {
                tracing::warn!(line = %line, "Source line is not a valid URL");
            }
            line.to_string()
        })
        .collect();
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "feedpage-test-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/feedpage.toml")).unwrap();
        assert_eq!(config.max_entries_per_source, 5);
        assert_eq!(config.image_timeout_secs, 10);
        assert_eq!(config.fallback_image, "assets/img/fallback.jpg");
    }

    #[test]
    fn partial_config_overrides_defaults() {
        let path = temp_file("partial.toml", "max_entries_per_source = 3\n");
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.max_entries_per_source, 3);
        assert_eq!(config.feed_timeout_secs, 30);
    }

    #[test]
    fn unknown_keys_tolerated() {
        let path = temp_file("unknown.toml", "not_a_real_key = true\n");
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.max_entries_per_source, 5);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let path = temp_file("bad.toml", "max_entries_per_source = [broken\n");
        let result = Config::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn sources_skip_blank_lines_and_whitespace() {
        let path = temp_file(
            "feeds.txt",
            "https://example.com/a.xml\n\n  https://example.com/b.xml  \n\n",
        );
        let sources = load_sources(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            sources,
            vec![
                "https://example.com/a.xml".to_string(),
                "https://example.com/b.xml".to_string()
            ]
        );
    }

    #[test]
    fn missing_source_list_is_fatal() {
        let result = load_sources(Path::new("/nonexistent/feeds.txt"));
        assert!(matches!(result, Err(ConfigError::SourceList { .. })));
    }
}
