use anyhow::{Context, Result};
use salescope_config::{LogFormat, LogLevel, LogRotation, LogTarget, LoggingConfig};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps non-blocking file writers flushing until dropped
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    guards: Vec<WorkerGuard>,
}

impl LoggingGuard {
    /// Number of background file writers held by this guard
    pub fn file_writers(&self) -> usize {
        self.guards.len()
    }
}

/// Build the global filter: `RUST_LOG` when set, then the configured level, then `info`.
///
/// An empty or unparsable `RUST_LOG` is ignored.
pub fn build_env_filter(log_level: &str) -> EnvFilter {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(log_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut guards = Vec::new();
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(config.targets.len());

    for target in &config.targets {
        match target {
            LogTarget::Console { level } => {
                layers.push(fmt_layer(config.format, std::io::stdout, true, config.include_location, *level));
            }
            LogTarget::File { path, level, rotation } => {
                let (directory, prefix) = split_log_path(path)?;
                std::fs::create_dir_all(&directory)
                    .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

                let appender = match rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(&directory, &prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(&directory, &prefix),
                    LogRotation::Never => tracing_appender::rolling::never(&directory, &prefix),
                };
                let (writer, guard) = tracing_appender::non_blocking(appender);
                guards.push(guard);

                layers.push(fmt_layer(config.format, writer, false, config.include_location, *level));
            }
        }
    }

    let env_filter = build_env_filter(config.level.as_str());

    if tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");

    Ok(LoggingGuard { guards })
}

fn fmt_layer<W>(
    format: LogFormat,
    writer: W,
    ansi: bool,
    include_location: bool,
    level: Option<LogLevel>,
) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_file(include_location)
        .with_line_number(include_location);

    let layer: BoxedLayer = match format {
        LogFormat::Json => base.json().with_current_span(true).boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Text => base.boxed(),
    };

    match level {
        Some(level) => layer.with_filter(level_filter(level)).boxed(),
        None => layer,
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Split `logs/salescope.log` into the directory and the rolling file prefix
fn split_log_path(path: &str) -> Result<(PathBuf, String)> {
    let path = Path::new(path);
    let prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Log file path '{}' has no file name", path.display()))?
        .to_string();

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, prefix) = split_log_path("logs/salescope.log").unwrap();
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(prefix, "salescope.log");

        let (dir, prefix) = split_log_path("salescope.log").unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(prefix, "salescope.log");

        assert!(split_log_path("/").is_err());
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(level_filter(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(level_filter(LogLevel::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn test_env_filter_falls_back_on_invalid_directive() {
        temp_env::with_var_unset("RUST_LOG", || {
            let rendered = build_env_filter("salescope=loud").to_string();
            assert_eq!(rendered, "info");
        });
    }

    #[test]
    fn test_rust_log_overrides_configured_level() {
        temp_env::with_var("RUST_LOG", Some("warn,salescope_storage=trace"), || {
            let rendered = build_env_filter("debug").to_string();
            assert!(rendered.contains("salescope_storage=trace"));
            assert!(!rendered.contains("debug"));
        });
    }

    #[test]
    fn test_blank_or_invalid_rust_log_uses_configured_level() {
        for value in ["", "   ", "salescope=loud"] {
            temp_env::with_var("RUST_LOG", Some(value), || {
                assert_eq!(build_env_filter("debug").to_string(), "debug");
            });
        }

        temp_env::with_var_unset("RUST_LOG", || {
            assert_eq!(build_env_filter("warn").to_string(), "warn");
        });
    }

    #[test]
    fn test_init_with_file_target_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let log_path = temp.path().join("nested").join("salescope.log");

        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Json,
            targets: vec![
                LogTarget::Console { level: Some(LogLevel::Warn) },
                LogTarget::File {
                    path: log_path.to_string_lossy().to_string(),
                    level: None,
                    rotation: LogRotation::Never,
                },
            ],
            include_location: true,
        };

        let guard = init_logging_from_config(&config).unwrap();
        assert_eq!(guard.file_writers(), 1);
        assert!(temp.path().join("nested").is_dir());

        // A second initialization must not fail
        assert!(init_logging_from_config(&LoggingConfig::default()).is_ok());
    }
}
