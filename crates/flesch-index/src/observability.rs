//! Logging setup: human-readable events on stderr plus an optional JSONL file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "FLESCH_INDEX_LOG_PATH";
const LOG_DIR_ENV: &str = "FLESCH_INDEX_LOG_DIR";
const LOG_FILE_PREFIX: &str = "flesch-index.jsonl";

/// Where (if anywhere) JSONL logs are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file; never rotated.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `FLESCH_INDEX_LOG_PATH` / `FLESCH_INDEX_LOG_DIR`, falling back to
    /// the configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(env_path(LOG_PATH_ENV), env_path(LOG_DIR_ENV), config_log_dir)
    }

    fn resolve(
        env_log_path: Option<PathBuf>,
        env_log_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_log_path,
            log_dir: env_log_dir.or(config_log_dir),
        }
    }

    /// Directory and file name for the file layer.
    ///
    /// An explicit path wins over a directory.
    fn file_target(&self) -> Option<(PathBuf, String, bool)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path.file_name()?.to_string_lossy().into_owned();
            return Some((dir.to_path_buf(), name, false));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), LOG_FILE_PREFIX.to_string(), true))
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Build the event filter.
///
/// `--quiet` and `-v` win over `RUST_LOG`, which wins over the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    let directive = if quiet {
        "error"
    } else {
        match verbose {
            0 => {
                return EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_level));
            }
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(directive)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the process exits.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match config.file_target() {
        Some((dir, name, rotate)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = if rotate {
                tracing_appender::rolling::daily(&dir, name)
            } else {
                tracing_appender::rolling::never(&dir, name)
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins() {
        assert_eq!(env_filter(true, 2, "debug").to_string(), "error");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(env_filter(false, 1, "warn").to_string(), "debug");
        assert_eq!(env_filter(false, 3, "warn").to_string(), "trace");
    }

    #[test]
    fn env_dir_overrides_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/env/logs")),
            Some(PathBuf::from("/config/logs")),
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/env/logs")));
    }

    #[test]
    fn no_target_without_locations() {
        let cfg = ObservabilityConfig::resolve(None, None, None);
        assert!(cfg.file_target().is_none());
    }

    #[test]
    fn explicit_path_is_not_rotated() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/var/log/flesch.jsonl")),
            None,
            Some(PathBuf::from("/config/logs")),
        );
        let (dir, name, rotate) = cfg.file_target().unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, "flesch.jsonl");
        assert!(!rotate);
    }

    #[test]
    fn bare_file_name_logs_to_cwd() {
        let cfg = ObservabilityConfig::resolve(Some(PathBuf::from("run.jsonl")), None, None);
        let (dir, _, _) = cfg.file_target().unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }

    #[test]
    fn directory_target_rotates() {
        let cfg = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/config/logs")));
        let (dir, name, rotate) = cfg.file_target().unwrap();
        assert_eq!(dir, PathBuf::from("/config/logs"));
        assert_eq!(name, LOG_FILE_PREFIX);
        assert!(rotate);
    }
}
