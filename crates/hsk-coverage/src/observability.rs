//! Logging and tracing setup.
//!
//! Human-readable events go to stderr. When a log directory or file can be
//! resolved, JSONL events are also written there through a non-blocking
//! daily-rolling appender.
//!
//! Log location precedence:
//! 1. `HSK_COVERAGE_LOG_PATH` (explicit file)
//! 2. `HSK_COVERAGE_LOG_DIR`
//! 3. `log_dir` from configuration
//! 4. The platform local data directory

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "HSK_COVERAGE_LOG_PATH";
const LOG_DIR_ENV: &str = "HSK_COVERAGE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "hsk-coverage.jsonl";

/// Where the JSONL file layer writes, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Directory holding the rolling log files.
    pub log_dir: Option<PathBuf>,
    /// File name prefix inside `log_dir`.
    pub file_prefix: String,
}

impl ObservabilityConfig {
    /// Resolve the log location from the environment, then `config_log_dir`,
    /// then the platform default.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
            hsk_coverage_core::config::user_data_local_dir()
                .map(|dir| dir.join("logs").into_std_path_buf()),
        )
    }

    fn resolve(
        explicit_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        default_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = explicit_path
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            return Self {
                log_dir: Some(
                    path.parent()
                        .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
                ),
                file_prefix: name.to_string(),
            };
        }

        Self {
            log_dir: env_dir.or(config_dir).or(default_dir),
            file_prefix: LOG_FILE_PREFIX.to_string(),
        }
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` limits output to errors, each
/// `-v` raises verbosity one step, and the configured level is the base.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_level(quiet, verbose, default_level))
}

fn filter_level(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Returns the appender guard when the file layer is active; dropping it
/// flushes pending log lines.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match config.log_dir.as_ref() {
        Some(dir) if std::fs::create_dir_all(dir).is_ok() => {
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        // An unwritable log directory leaves stderr logging in place.
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = ObservabilityConfig::resolve(
            Some(PathBuf::from("/var/log/hsk/run.jsonl")),
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/config")),
            None,
        );
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/hsk")));
        assert_eq!(config.file_prefix, "run.jsonl");
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let config = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/config")),
            Some(PathBuf::from("/default")),
        );
        assert_eq!(config.log_dir, Some(PathBuf::from("/env")));
        assert_eq!(config.file_prefix, LOG_FILE_PREFIX);
    }

    #[test]
    fn falls_back_to_default_dir() {
        let config =
            ObservabilityConfig::resolve(None, None, None, Some(PathBuf::from("/default")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/default")));
    }

    #[test]
    fn quiet_and_verbose_levels() {
        assert_eq!(filter_level(true, 2, "info"), "error");
        assert_eq!(filter_level(false, 0, "warn"), "warn");
        assert_eq!(filter_level(false, 1, "info"), "debug");
        assert_eq!(filter_level(false, 3, "info"), "trace");
    }
}
