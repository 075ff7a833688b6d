//! Dispatcher error types
//!
//! Only precondition failures are errors here; delivery and notification
//! problems are best-effort and surface as `ContractError`s in the logs.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Precondition failures that stop a dispatch run before any delivery
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Instruction file does not exist
    #[error("instructions file not found: {}", path.display())]
    InstructionsMissing { path: PathBuf },

    /// Instruction file is older than the staleness threshold
    #[error("instructions file {} is stale: age {}s exceeds {}s", path.display(), age.as_secs(), max_age.as_secs())]
    InstructionsStale {
        path: PathBuf,
        age: Duration,
        max_age: Duration,
    },

    /// Instruction file is empty after trimming
    #[error("instructions file is empty: {}", path.display())]
    InstructionsEmpty { path: PathBuf },

    /// Instruction file exists but could not be read
    #[error("failed to read instructions file {}: {source}", path.display())]
    InstructionsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DispatcherError {
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::InstructionsMissing { path: path.into() }
    }

    pub fn stale(path: impl Into<PathBuf>, age: Duration, max_age: Duration) -> Self {
        Self::InstructionsStale {
            path: path.into(),
            age,
            max_age,
        }
    }

    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::InstructionsEmpty { path: path.into() }
    }

    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InstructionsUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Text shown to the user in the failure notification
    pub fn user_message(&self) -> String {
        match self {
            Self::InstructionsMissing { .. } => {
                "No instructions file found. Run /smart-compact first.".to_string()
            }
            Self::InstructionsStale { max_age, .. } => format!(
                "Instructions are stale (>{} min old). Run /smart-compact again.",
                max_age.as_secs() / 60
            ),
            Self::InstructionsEmpty { .. } => "Instructions file is empty.".to_string(),
            Self::InstructionsUnreadable { .. } => {
                "Instructions file could not be read.".to_string()
            }
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        1
    }
}
