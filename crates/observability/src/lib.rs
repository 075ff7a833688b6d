//! # Observability
//!
//! Tracing initialisation for the smart-compact binaries.
//!
//! Logs go to stderr so stdout stays free for console notifications and
//! machine-readable command output.
//!
//! ## Usage
//!
//! ```ignore
//! observability::init_with_config(ObservabilityConfig {
//!     log_format: LogFormat::Compact,
//!     ..Default::default()
//! })?;
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialise with defaults (compact format, `info` level)
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Level used when `RUST_LOG` is not set
    pub default_log_level: String,
    /// Ignore `RUST_LOG` and use `default_log_level` as-is
    pub force_level: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            default_log_level: "info".to_string(),
            force_level: false,
        }
    }
}

impl ObservabilityConfig {
    /// Level from `-v` count / `-q`
    pub fn from_verbosity(verbose: u8, quiet: bool, log_format: LogFormat) -> Self {
        let (level, force_level) = if quiet {
            ("warn", true)
        } else {
            let level = match verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            };
            (level, false)
        };
        Self {
            log_format,
            default_log_level: level.to_string(),
            force_level,
        }
    }

    fn filter(&self) -> EnvFilter {
        if self.force_level {
            return EnvFilter::new(&self.default_log_level);
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_log_level))
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

/// Initialise with custom configuration
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(log_format = ?config.log_format, "Observability initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.default_log_level, "info");
        assert!(!config.force_level);
    }

    #[test]
    fn test_from_verbosity() {
        assert_eq!(
            ObservabilityConfig::from_verbosity(1, false, LogFormat::Json).default_log_level,
            "debug"
        );
        assert_eq!(
            ObservabilityConfig::from_verbosity(5, false, LogFormat::Json).default_log_level,
            "trace"
        );
        let quiet = ObservabilityConfig::from_verbosity(2, true, LogFormat::Pretty);
        assert_eq!(quiet.default_log_level, "warn");
        assert!(quiet.force_level);
    }

    #[test]
    fn test_second_init_fails() {
        // only one global subscriber may be installed per process
        let _ = init();
        assert!(init().is_err());
    }
}
