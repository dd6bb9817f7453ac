//! Configuration types for search aggregation and the image crawl.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrawlError};
use trawl_search::SearchConfig;

/// Hard ceiling on crawl targets per session.
pub const MAX_CRAWL_TARGETS: usize = 10;

/// URL patterns that make a ranked result eligible for crawling.
pub const DEFAULT_CRAWL_PATTERNS: &[&str] = &[
    r"wikipedia\.org",
    r"github\.com",
    r"reddit\.com",
    r"medium\.com",
    r"news\.",
    r"blog",
    r"article",
];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrawlConfig {
    /// Provider selection, limits and timeouts for the search stage.
    pub search: SearchConfig,
    /// Target selection and pacing for the image crawl.
    pub crawl: CrawlConfig,
}

/// Image crawl configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum number of ranked results crawled per session (1..=10).
    pub max_targets: usize,
    /// Pause after each crawl step, in milliseconds.
    pub step_delay_ms: u64,
    /// Per-target extraction timeout in seconds.
    pub extract_timeout_seconds: u64,
    /// Regular expressions; a result is crawlable when its URL matches any.
    pub patterns: Vec<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_targets: MAX_CRAWL_TARGETS,
            step_delay_ms: 500,
            extract_timeout_seconds: 10,
            patterns: DEFAULT_CRAWL_PATTERNS
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
        }
    }
}

impl CrawlConfig {
    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrawlError::Config`] if `max_targets` is outside `1..=10`,
    /// the extraction timeout is zero, or a pattern fails to compile.
    pub fn validate(&self) -> Result<()> {
        if self.max_targets == 0 || self.max_targets > MAX_CRAWL_TARGETS {
            return Err(TrawlError::Config(format!(
                "crawl.max_targets must be between 1 and {MAX_CRAWL_TARGETS}"
            )));
        }
        if self.extract_timeout_seconds == 0 {
            return Err(TrawlError::Config(
                "crawl.extract_timeout_seconds must be greater than 0".into(),
            ));
        }
        regex::RegexSet::new(&self.patterns)
            .map_err(|e| TrawlError::Config(format!("invalid crawl pattern: {e}")))?;
        Ok(())
    }
}

impl TrawlConfig {
    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.crawl.validate()
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TrawlError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TrawlError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/trawl/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("trawl").join("config.toml")
        } else if let Some(config) = dirs::config_dir() {
            config.join("trawl").join("config.toml")
        } else {
            PathBuf::from("/tmp/trawl-config/config.toml")
        }
    }

    /// Load the config at `path` if given, otherwise the default path if it
    /// exists, otherwise built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::default_config_path();
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
