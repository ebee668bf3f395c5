//! # Logger
//!
//! Console and file logging for the `zk` toolbox.
//!
//! Console output goes to stderr so command output on stdout stays machine readable.
//! An optional log file (`<dir>/<name>.log`) receives the same events without ANSI colors,
//! in plain text or JSON. `RUST_LOG` overrides the programmatic level.
//!
//! ## Example
//!
//! ```rust
//! # use zk_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("zk")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { console: true, path: None, level: LevelFilter::INFO, json: false, env_filter: None }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
///
/// A name is required before [`LoggerBuilder::init`] becomes available.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name of the logger, also used as the log file name.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { config: self.config, name: WithName(name.into()) }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Maps a `-v` count to a level: none is `INFO`, one is `DEBUG`, more is `TRACE`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn verbosity(self, count: u8) -> Self {
        let level = match count {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        self.level(level)
    }

    /// Adds an explicit env filter (e.g., `zk_kernel=debug`).
    ///
    /// Invalid filters will cause [`LoggerBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables console logging on stderr.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Also writes events to `<dir>/<name>.log`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.path = Some(dir.into());
        self
    }

    /// Writes the log file as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.config.json = true;
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle that must be kept alive until shutdown so that buffered file
    /// output is flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set and
    /// [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        validate_config(&self.config, &name)?;

        let env_filter = build_env_filter(&self.config)?;
        let mut layers = Vec::new();

        if self.config.console {
            layers.push(layer().compact().with_writer(std::io::stderr).with_target(false).boxed());
        }

        let guard = if let Some(dir) = self.config.path {
            fs::create_dir_all(&dir).map_err(|source| LoggerError::Io {
                path: dir.display().to_string(),
                source,
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(&dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            let file_layer = layer().with_writer(non_blocking).with_ansi(false);
            layers.push(if self.config.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    pub fn builder() -> LoggerBuilder<NoName> {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    /// Returns the file writer guard, present only when file logging is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
        });
    }

    if !config.console && config.path.is_none() {
        return Err(LoggerError::InvalidConfiguration {
            message: "No logging output enabled. Enable console or file output.".into(),
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_initial_state() {
        let builder = Logger::builder().name("zk").env_filter("zk_kernel=debug");
        assert!(builder.config.console);
        assert_eq!(builder.config.level, LevelFilter::INFO);
        assert_eq!(builder.config.env_filter.as_deref(), Some("zk_kernel=debug"));
        assert!(builder.config.path.is_none());
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(Logger::builder().name("zk").verbosity(0).config.level, LevelFilter::INFO);
        assert_eq!(Logger::builder().name("zk").verbosity(1).config.level, LevelFilter::DEBUG);
        assert_eq!(Logger::builder().name("zk").verbosity(5).config.level, LevelFilter::TRACE);
    }

    #[test]
    fn empty_name_is_rejected_before_install() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn no_outputs_is_rejected() {
        let err = Logger::builder().name("zk").console(false).init().unwrap_err();
        assert!(err.to_string().contains("No logging output enabled"));
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let err = Logger::builder().name("zk").env_filter("zk=[[[").init().unwrap_err();
        assert!(err.to_string().contains("Invalid env filter"));
    }
}
