//! # Logger
//!
//! Installs the global `tracing` subscriber for Chairside binaries: a compact console layer
//! on stderr (stdout stays free for program output),
//! an optional rolling file layer (plain or JSON) written through a non-blocking worker, and
//! an [`EnvFilter`] built from a default level and directives. An explicit
//! [`LoggerBuilder::env_filter`] wins, then `RUST_LOG`, then [`LoggerBuilder::default_filter`].
//!
//! ## Example
//!
//! ```rust
//! # use chairside_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder("my-app")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::{env, fs};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct FileOutput {
    path: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    default_filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Configures the minimum log level used when no directive matches.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds an explicit filter directive (e.g., `chairside=debug,config=warn`).
    ///
    /// When set, it replaces `RUST_LOG`. Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used only when `RUST_LOG` is unset or empty.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = Some(filter.into());
        self
    }

    /// Enables or disables the console layer.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Writes logs to rolling files named `<name>.<date>.log` inside `path`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(FileOutput {
            path: path.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        self
    }

    /// Maximum number of rotated files kept on disk. Ignored without [`LoggerBuilder::path`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    /// File rotation strategy. Ignored without [`LoggerBuilder::path`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// Emits JSON lines to the log file. Ignored without [`LoggerBuilder::path`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn json(mut self, enabled: bool) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.json = enabled;
        }
        self
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// The returned [`Logger`] owns the file worker guard; keep it alive until shutdown so
    /// buffered lines are flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, a bad
    ///   filter directive, or when no layer is enabled.
    /// * [`LoggerError::Internal`] if the log directory cannot be created.
    /// * [`LoggerError::Appender`] if the rolling appender cannot be opened.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();

        if self.console {
            layers.push(layer().compact().with_writer(std::io::stderr).with_ansi(true).boxed());
        }

        let guard = match self.file {
            Some(file) => {
                fs::create_dir_all(&file.path).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Failed to create path: {}", file.path.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(file.rotation)
                    .filename_prefix(&self.name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(file.max_files)
                    .build(&file.path)
                    .context("Opening rolling log file")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { name: self.name, guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        if self.file.as_ref().is_some_and(|f| f.max_files == 0) {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        Ok(())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        let from_env = env::var(EnvFilter::DEFAULT_ENV).is_ok_and(|v| !v.trim().is_empty());

        let filter = match (&self.env_filter, &self.default_filter) {
            (Some(filter), _) => filter,
            (None, Some(filter)) if !from_env => filter,
            _ => return Ok(builder.from_env_lossy()),
        };

        builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid env filter '{filter}': {e}").into(),
            context: None,
        })
    }
}

/// Handle to the initialized logging system.
///
/// Holds the background worker guard of the file layer. Drop it only on shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    name: String,
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a [`LoggerBuilder`]. `name` prefixes rolling log files
    /// (e.g., `my-app.2026-10-19.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
            default_filter: None,
            file: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when a file layer (and its worker thread) is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!(logger = %self.name, "Logging system shutting down, flushing buffers...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_builder_initial_state() {
        let builder = Logger::builder("test-app").env_filter("chairside=debug");
        assert!(builder.console);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert_eq!(builder.env_filter.as_deref(), Some("chairside=debug"));
        assert!(builder.default_filter.is_none());
        assert!(builder.file.is_none());

        let builder = Logger::builder("test-app").default_filter("warn");
        assert!(builder.env_filter.is_none());
        assert_eq!(builder.default_filter.as_deref(), Some("warn"));
    }

    #[test]
    fn test_file_options_require_path() {
        let builder = Logger::builder("test-app").max_files(3).json(true);
        assert!(builder.file.is_none());

        let builder = Logger::builder("test-app").path("logs").max_files(3).json(true);
        let file = builder.file.expect("file output configured");
        assert_eq!(file.max_files, 3);
        assert!(file.json);
        assert_eq!(file.path, PathBuf::from("logs"));
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let err = Logger::builder("  ").init().expect_err("empty name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder("test-app").path("logs").max_files(0).init().expect_err("zero");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder("test-app").env_filter("chairside=notalevel").init().expect_err("filter");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder("test-app").console(false).init().expect_err("no layers");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn test_file_logging_setup() -> Result<(), LoggerError> {
        let tmp_dir = tempdir().map_err(|e| LoggerError::Internal {
            message: e.to_string().into(),
            context: Some("Failed to create temp dir".into()),
        })?;
        let log_dir = tmp_dir.path().join("logs");

        let logger = Logger::builder("test-app").console(false).path(&log_dir).init()?;
        assert!(logger.writes_files());

        tracing::info!("hello world");
        std::thread::sleep(Duration::from_millis(20));
        drop(logger);

        let has_log = fs::read_dir(&log_dir)
            .map_err(|e| LoggerError::Internal { message: e.to_string().into(), context: None })?
            .flatten()
            .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));

        assert!(has_log, "at least one log file should be created");
        Ok(())
    }
}
