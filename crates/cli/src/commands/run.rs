//! `run` command implementation.

use contracts::DispatchSettings;
use dispatcher::create_dispatcher;
use tracing::info;

use crate::error::{CliError, Result};

/// Execute the `run` command
pub async fn run_dispatch(settings: DispatchSettings) -> Result<()> {
    info!(
        instructions = %settings.instructions_path.display(),
        session_file = %settings.session_path.display(),
        "Dispatching compact instructions"
    );

    let mut dispatcher = create_dispatcher(settings);
    let report = dispatcher.run().await?;

    match report.tier {
        Some(tier) => {
            info!(
                tier = %tier,
                follow_up_sent = report.follow_up_sent,
                "Smart Compact complete"
            );
            Ok(())
        }
        None => Err(CliError::Undelivered),
    }
}
