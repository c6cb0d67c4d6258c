//! Structured logging setup for dataforge
//!
//! Diagnostics go to stderr through a `tracing` subscriber so that stdout
//! carries only the run summary. `RUST_LOG` takes precedence over the
//! configured level when set.
//!
//! ```no_run
//! use dataforge::config::DataforgeConfig;
//! use dataforge::util::logging::{init_logging, LoggingConfig};
//!
//! init_logging(LoggingConfig::from_config(&DataforgeConfig::default()));
//! tracing::info!(phase = "beans", "Starting phase");
//! ```

use crate::config::DataforgeConfig;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Crates whose output is capped at `warn` unless `RUST_LOG` says otherwise
const NOISY_CRATES: &[&str] = &["h2", "hyper", "hyper_util", "reqwest"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., dataforge::extract::fields) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// Subscriber settings for a resolved run configuration
    pub fn from_config(config: &DataforgeConfig) -> Self {
        Self {
            level: parse_level(&config.log_level),
            use_json: config.log_json,
            ..Default::default()
        }
    }
}

/// Parses a log level, case-insensitively; unknown values fall back to INFO
///
/// ```
/// use dataforge::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level, rust_log_set: bool) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    if !rust_log_set {
        if let Ok(directive) = format!("dataforge={}", level).parse() {
            filter = filter.add_directive(directive);
        }
        for krate in NOISY_CRATES {
            if let Ok(directive) = format!("{}=warn", krate).parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level, env::var("RUST_LOG").is_ok());

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_thread_ids(config.include_thread_ids)
            .with_thread_names(config.include_thread_ids);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_from_config() {
        let mut config = DataforgeConfig::with_dirs("src", "out");
        config.log_level = "warn".to_string();
        config.log_json = true;

        let logging = LoggingConfig::from_config(&config);
        assert_eq!(logging.level, Level::WARN);
        assert!(logging.use_json);
        assert!(logging.include_target);
    }

    #[test]
    #[serial]
    fn test_filter_directives() {
        let previous = env::var("RUST_LOG").ok();
        env::remove_var("RUST_LOG");
        let filter = build_filter(Level::DEBUG, false).to_string();
        let overridden = build_filter(Level::DEBUG, true).to_string();
        if let Some(value) = previous {
            env::set_var("RUST_LOG", value);
        }

        assert!(filter.contains("dataforge=debug"));
        assert!(filter.contains("reqwest=warn"));
        assert!(!overridden.contains("reqwest=warn"));
        assert!(!overridden.contains("dataforge=debug"));
    }

    #[test]
    #[serial]
    fn test_rust_log_wins_over_configured_level() {
        let previous = env::var("RUST_LOG").ok();
        env::set_var("RUST_LOG", "dataforge=trace");
        let filter = build_filter(Level::INFO, true).to_string();
        match previous {
            Some(value) => env::set_var("RUST_LOG", value),
            None => env::remove_var("RUST_LOG"),
        }

        assert!(filter.contains("dataforge=trace"), "{}", filter);
        assert!(!filter.contains("dataforge=info"), "{}", filter);
    }

    #[test]
    #[serial]
    fn test_configured_level_applies_without_rust_log() {
        let previous = env::var("RUST_LOG").ok();
        env::remove_var("RUST_LOG");
        let filter = build_filter(Level::WARN, false).to_string();
        if let Some(value) = previous {
            env::set_var("RUST_LOG", value);
        }

        assert!(filter.contains("dataforge=warn"), "{}", filter);
    }
}
