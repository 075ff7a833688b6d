//! Layered error definitions
//!
//! Categorized by source: config / multiplexer / keystroke

use std::time::Duration;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Multiplexer Errors =====
    /// Multiplexer command failed or exited non-zero
    #[error("multiplexer '{program}' error: {message}")]
    Multiplexer { program: String, message: String },

    /// Multiplexer command did not finish in time
    #[error("multiplexer '{program}' timed out after {waited:?}")]
    MultiplexerTimeout { program: String, waited: Duration },

    // ===== Keystroke Errors =====
    /// No input-simulation tool for this platform
    #[error("keystroke simulation unavailable: {message}")]
    KeystrokeUnavailable { message: String },

    /// Input-simulation tool failed
    #[error("keystroke backend '{backend}' error: {message}")]
    Keystroke { backend: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create multiplexer error
    pub fn multiplexer(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Multiplexer {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create keystroke backend error
    pub fn keystroke(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Keystroke {
            backend: backend.into(),
            message: message.into(),
        }
    }

    pub fn keystroke_unavailable(message: impl Into<String>) -> Self {
        Self::KeystrokeUnavailable {
            message: message.into(),
        }
    }
}
