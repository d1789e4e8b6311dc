//! Tracing setup for calimport
//!
//! The plugin's stdout carries host frames, so every layer installed here
//! writes to stderr.
//!
//! # Usage
//!
//! ```ignore
//! use calimport_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::default().with_format(TracingOutputFormat::Json))?;
//! ```

use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format (default)
    #[default]
    Compact,
    /// JSON format, one record per line
    Json,
}

impl FromStr for TracingOutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown log format '{other}' (expected pretty, compact or json)"
            )),
        }
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// The default log level when RUST_LOG is not set
    pub default_level: Level,
    /// Output format for log messages
    pub output_format: TracingOutputFormat,
    /// Whether to include file/line information in logs
    pub include_location: bool,
    /// Whether to include target (module path) in logs
    pub include_target: bool,
    /// Custom env filter directive (overrides default_level if set)
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: true,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// Create a config for debugging a plugin run by hand
    #[must_use]
    pub fn debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            ..Self::default()
        }
    }

    /// Set the default log level
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set a custom env filter directive
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the env filter: explicit directive, then `RUST_LOG`, then
    /// `calimport=<default_level>`.
    fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(ref filter) = self.env_filter {
            return Ok(EnvFilter::try_new(filter)?);
        }

        Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("calimport={}", self.default_level))))
    }
}

/// Initialize tracing with the given configuration.
///
/// Call once, before the first log record. `RUST_LOG` overrides the default
/// level unless the config carries its own filter directive.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set or if
/// the env filter directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = config.build_filter()?;

    let layer = match config.output_format {
        TracingOutputFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(config.include_target)
            .boxed(),
        TracingOutputFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(config.include_target)
            .boxed(),
        TracingOutputFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_target(config.include_target)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
