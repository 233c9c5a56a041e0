//! JsonSettings Logging
//!
//! Subscriber setup shared by the JsonSettings binaries.
//!
//! `RUST_LOG` wins when set; otherwise the requested [`LogLevel`] applies to
//! everything.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{fmt as fmt_layer, prelude::*, EnvFilter};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("Unknown log level: {0}")]
    UnknownLevel(String),
}

/// Verbosity of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub fn directive(&self) -> String {
        format!("{level},jsonsettings={level}", level = self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(LoggingError::UnknownLevel(s.to_string())),
        }
    }
}

fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install the global subscriber, failing if one is already set
pub fn try_init(level: LogLevel) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(fmt_layer::layer().with_writer(std::io::stderr))
        .with(filter_for(level))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Install the global subscriber, ignoring an existing one
pub fn init(level: LogLevel) {
    if try_init(level).is_err() {
        tracing::debug!("Logging already initialized, keeping existing subscriber");
    }
}
