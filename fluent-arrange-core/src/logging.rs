//! Logging for fluent-arrange
//!
//! The library emits structured `tracing` events and never installs a
//! subscriber by itself. Test binaries that want to see what the resolver and
//! the arrangement context are doing can install one with [`LogConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use fluent_arrange_core::logging::*;
//!
//! // Level and format from FLUENT_ARRANGE_LOG / FLUENT_ARRANGE_LOG_FORMAT
//! let _ = LogConfig::from_env().init();
//!
//! debug!("arrangement logging enabled");
//! ```
//!
//! ```no_run
//! use fluent_arrange_core::logging::*;
//!
//! let config = LogConfig::new()
//!     .level(LogLevel::Trace)
//!     .format(LogFormat::Pretty)
//!     .output(LogOutput::Test);
//!
//! config.init().expect("subscriber already installed");
//! ```
//!
//! # Environment Variables
//!
//! - `FLUENT_ARRANGE_LOG=trace|debug|info|warn|error` - Set log level
//! - `FLUENT_ARRANGE_LOG_FORMAT=json|pretty|compact|plain` - Set output format
//! - `RUST_LOG` - Overrides the level with a full filter directive

use std::env;
use std::io;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing::{debug, error, info, trace, warn};

/// Environment variable holding the log level.
pub const LEVEL_ENV: &str = "FLUENT_ARRANGE_LOG";

/// Environment variable holding the output format.
pub const FORMAT_ENV: &str = "FLUENT_ARRANGE_LOG_FORMAT";

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Per-parameter and per-lookup detail
    Trace,
    /// Resolution and build lifecycle
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn to_tracing_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    /// Convert to string for EnvFilter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Plain,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "plain" => Some(LogFormat::Plain),
            "pretty" => Some(LogFormat::Pretty),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

/// Output destination for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// libtest's captured output, shown only for failing tests
    Test,
}

#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Include target (module path)
    pub targets: bool,
    pub colors: bool,
    /// Custom filter directive (overrides level and RUST_LOG if set)
    pub env_filter: Option<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from `FLUENT_ARRANGE_LOG` and
    /// `FLUENT_ARRANGE_LOG_FORMAT`, falling back to the defaults for unset or
    /// unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let level = env::var(LEVEL_ENV)
            .ok()
            .and_then(|s| LogLevel::from_str(&s))
            .unwrap_or(defaults.level);

        let format = env::var(FORMAT_ENV)
            .ok()
            .and_then(|s| LogFormat::from_str(&s))
            .unwrap_or(defaults.format);

        Self {
            level,
            format,
            ..defaults
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    pub fn with_colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    /// Set a custom filter such as `"fluent_arrange_core=trace"`.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn build_filter(&self) -> Result<EnvFilter, LogInitError> {
        match &self.env_filter {
            Some(directive) => EnvFilter::try_new(directive)
                .map_err(|e| LogInitError::InvalidFilter(e.to_string())),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))),
        }
    }

    /// Install a global subscriber.
    ///
    /// Fails instead of panicking when a subscriber is already installed, so
    /// every test may call it.
    pub fn init(self) -> Result<(), LogInitError> {
        let filter = self.build_filter()?;

        match self.output {
            LogOutput::Stdout => self.init_with_writer(io::stdout, filter),
            LogOutput::Stderr => self.init_with_writer(io::stderr, filter),
            LogOutput::Test => self.init_with_writer(fmt::TestWriter::new(), filter),
        }
    }

    fn init_with_writer<W>(&self, writer: W, filter: EnvFilter) -> Result<(), LogInitError>
    where
        W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
    {
        let registry = tracing_subscriber::registry().with(filter);

        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_target(self.targets),
                )
                .try_init(),
            LogFormat::Plain => registry
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_ansi(self.colors),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_ansi(self.colors),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_ansi(self.colors),
                )
                .try_init(),
        };

        installed.map_err(|e| LogInitError::Install(e.to_string()))
    }
}

impl Default for LogConfig {
    /// Compact output to libtest's capture at WARN level
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            output: LogOutput::Test,
            targets: true,
            colors: false,
            env_filter: None,
        }
    }
}
