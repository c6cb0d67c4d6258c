//! Configuration management for dataforge
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Command-line flags override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `DATAFORGE_SOURCE_DIR`: Corpus root - default: "dataset/source_code"
//! - `DATAFORGE_OUTPUT_DIR`: Artifact root - default: "dataset"
//! - `DATAFORGE_MAPPING_FILE`: Fallback command mapping - default: "<source>/protocol.py"
//! - `DATAFORGE_SEARCH_URL`: Semantic-search endpoint - default: unset (enrichment disabled)
//! - `DATAFORGE_SEARCH_TIMEOUT`: Search timeout in seconds - default: "5"
//! - `DATAFORGE_SEARCH_TOP_K`: Hits requested per enrichment query - default: "3"
//! - `DATAFORGE_LOG_LEVEL`: Logging level - default: "info"
//! - `DATAFORGE_LOG_JSON`: JSON log lines - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use dataforge::DataforgeConfig;
//!
//! let config = DataforgeConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_SOURCE_DIR: &str = "dataset/source_code";
const DEFAULT_OUTPUT_DIR: &str = "dataset";
const DEFAULT_MAPPING_FILE_NAME: &str = "protocol.py";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 5;
const DEFAULT_SEARCH_TOP_K: usize = 3;

const GAME_DATA_DIR_NAME: &str = "game_data";
const DOCS_DIR_NAME: &str = "documentation";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Main configuration structure for dataforge
#[derive(Debug, Clone)]
pub struct DataforgeConfig {
    /// Root of the decompiled source corpus
    pub source_dir: PathBuf,

    /// Root under which `game_data/` and `documentation/` are written
    pub output_dir: PathBuf,

    /// Category to command-name mapping used when a category has no definition files
    pub mapping_file: PathBuf,

    /// Semantic-search endpoint; `None` disables enrichment
    pub search_url: Option<String>,

    /// Search request timeout in seconds
    pub search_timeout_secs: u64,

    /// Hits requested per enrichment query
    pub search_top_k: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for DataforgeConfig {
    /// Creates a new configuration by loading from environment variables with defaults
    fn default() -> Self {
        let source_dir = env::var("DATAFORGE_SOURCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SOURCE_DIR));

        let output_dir = env::var("DATAFORGE_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let mapping_file = env::var("DATAFORGE_MAPPING_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| source_dir.join(DEFAULT_MAPPING_FILE_NAME));

        let search_url = env::var("DATAFORGE_SEARCH_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let search_timeout_secs = env::var("DATAFORGE_SEARCH_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS);

        let search_top_k = env::var("DATAFORGE_SEARCH_TOP_K")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_SEARCH_TOP_K);

        let log_level = env::var("DATAFORGE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("DATAFORGE_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            source_dir,
            output_dir,
            mapping_file,
            search_url,
            search_timeout_secs,
            search_top_k,
            log_level,
            log_json,
        }
    }
}

impl DataforgeConfig {
    /// Configuration rooted at explicit directories, ignoring the environment
    pub fn with_dirs(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        Self {
            mapping_file: source_dir.join(DEFAULT_MAPPING_FILE_NAME),
            source_dir,
            output_dir: output_dir.into(),
            search_url: None,
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            search_top_k: DEFAULT_SEARCH_TOP_K,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any validation fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Search timeout must be at least 1 second".to_string(),
            ));
        }
        if self.search_timeout_secs > 60 {
            return Err(ConfigError::ValidationFailed(
                "Search timeout cannot exceed 60 seconds".to_string(),
            ));
        }

        if self.search_top_k == 0 || self.search_top_k > 50 {
            return Err(ConfigError::ValidationFailed(format!(
                "Search top-k must be between 1 and 50, got {}",
                self.search_top_k
            )));
        }

        if let Some(url) = &self.search_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ParseError {
                    field: "DATAFORGE_SEARCH_URL".to_string(),
                    error: format!("expected an http(s) URL, got '{}'", url),
                });
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn game_data_dir(&self) -> PathBuf {
        self.output_dir.join(GAME_DATA_DIR_NAME)
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.output_dir.join(DOCS_DIR_NAME)
    }
}

impl fmt::Display for DataforgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataforge Configuration:")?;
        writeln!(f, "  Source Dir: {}", self.source_dir.display())?;
        writeln!(f, "  Output Dir: {}", self.output_dir.display())?;
        writeln!(f, "  Mapping File: {}", self.mapping_file.display())?;
        match self.search_url {
            Some(ref url) => writeln!(f, "  Search: {} (top {})", url, self.search_top_k)?,
            None => writeln!(f, "  Search: disabled")?,
        }
        writeln!(f, "  Log Level: {}{}", self.log_level, if self.log_json { " (json)" } else { "" })?;
        Ok(())
    }
}
