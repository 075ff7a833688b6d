//! Subprocess execution with a deadline

use std::process::Output;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Why an external command did not succeed
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error("failed to spawn: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
}

/// Run `command` to completion, killing it if `deadline` passes first
///
/// Stdout/stderr are captured. Non-zero exit is a failure.
pub async fn run_with_deadline(
    command: &mut Command,
    deadline: Duration,
) -> Result<Output, CommandFailure> {
    command.kill_on_drop(true);
    debug!(command = ?command.as_std(), timeout_ms = deadline.as_millis() as u64, "Running command");

    let output = tokio::time::timeout(deadline, command.output())
        .await
        .map_err(|_| CommandFailure::TimedOut(deadline))?
        .map_err(CommandFailure::Spawn)?;

    if output.status.success() {
        Ok(output)
    } else {
        Err(CommandFailure::Exit {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
