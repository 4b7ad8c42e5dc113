//! Structured logging for the Strata terrain engine.
//!
//! Span-based, filterable logging via the `tracing` ecosystem: console
//! output with uptime timestamps and module paths, plus optional JSON file
//! logging for post-mortem analysis of generation runs.

use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the terrain engine.
///
/// Console output shows uptime, module path, and severity; when `log_dir`
/// is given, a structured JSON log file is written alongside it. The
/// filter defaults to `info` and respects `RUST_LOG`.
///
/// # Examples
///
/// ```no_run
/// use strata_log::init_logging;
///
/// // Console only.
/// init_logging(None);
///
/// // Console plus JSON file logging.
/// init_logging(Some(std::path::Path::new("./logs")));
/// ```
pub fn init_logging(log_dir: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_env_filter());

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true) // generation workers are named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("strata.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The default filter: `info` everywhere.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        let filter = default_env_filter();
        assert!(format!("{}", filter).contains("info"));
    }

    #[test]
    fn test_per_crate_filter_parses() {
        let filter = EnvFilter::new("info,strata_worldgen=debug");
        let filter_str = format!("{}", filter);
        assert!(filter_str.contains("strata_worldgen=debug"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_common_filter_strings_parse() {
        let valid_filters = [
            "info",
            "debug,strata_noise=trace",
            "warn,strata_worldgen=debug,strata_terrain=trace",
            "error",
        ];
        for filter_str in &valid_filters {
            assert!(
                EnvFilter::try_from(*filter_str).is_ok(),
                "Failed to parse filter: {}",
                filter_str
            );
        }
    }

    #[test]
    fn test_log_file_path_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("strata.log");
        assert_eq!(log_file_path.file_name().unwrap(), "strata.log");
    }
}
