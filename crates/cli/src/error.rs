//! Error types for CLI operations.

use dispatcher::DispatcherError;
use thiserror::Error;

/// Exit status for every failure: preconditions, settings, undelivered command
pub const EXIT_FAILURE: u8 = 1;

/// CLI-level failure
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing, stale, empty or unreadable instructions
    #[error(transparent)]
    Precondition(#[from] DispatcherError),

    /// Neither the multiplexer nor keystroke simulation delivered the command
    #[error("compact command was not delivered; instructions kept for retry")]
    Undelivered,

    /// Settings, serialization or other setup error
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Precondition(e) => e.exit_code(),
            Self::Undelivered => EXIT_FAILURE,
            Self::Other(_) => EXIT_FAILURE,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
