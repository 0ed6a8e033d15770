//! Structured logging for the geode tools via the `tracing` ecosystem.
//!
//! Console output carries uptime timestamps and module paths. When enabled in
//! the config, a JSON log file is written as well. `RUST_LOG` always wins over
//! the configured level.

use geode_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written into the log directory.
pub const LOG_FILE_NAME: &str = "geode.log";

/// Resolve the filter string from the config, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file
/// * `file_logging` - write [`LOG_FILE_NAME`] into `log_dir` in addition to the console
/// * `config` - optional configuration supplying the log level
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
///
/// ```no_run
/// use geode_config::Config;
/// use geode_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, file_logging: bool, config: Option<&Config>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if file_logging
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let _ = subscriber.with(file_layer).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_config() {
        assert_eq!(filter_directive(None), "info");
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,geode_icosphere=trace".to_string();
        let directive = filter_directive(Some(&config));
        assert_eq!(directive, "debug,geode_icosphere=trace");
        assert!(EnvFilter::try_new(&directive).is_ok());
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filter_parses() {
        let valid_filters = ["info", "warn,geode_icosphere=debug", "error", "trace"];
        for filter_str in valid_filters {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "Failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_file_logging_creates_log_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        init_logging(Some(log_dir.as_path()), true, None);
        tracing::info!("file logging smoke test");

        assert!(log_dir.exists());
        assert!(log_dir.join(LOG_FILE_NAME).exists());
    }
}
