//! `check` command implementation.

use anyhow::Context;
use contracts::{DeliveryTier, DispatchSettings};
use dispatcher::create_dispatcher;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::CheckArgs;
use crate::error::Result;

/// Dry-run result for JSON output
#[derive(Serialize)]
struct CheckResult {
    ready: bool,
    instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<DeliveryTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    follow_up: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the `check` command
///
/// Runs validation and sanitization only: nothing is sent, nobody is
/// notified and no file is removed.
pub async fn run_check(args: &CheckArgs, settings: DispatchSettings) -> Result<()> {
    info!(
        instructions = %settings.instructions_path.display(),
        "Checking compact instructions"
    );

    let instructions = settings.instructions_path.display().to_string();
    let follow_up = settings.follow_up().map(str::to_string);
    let dispatcher = create_dispatcher(settings);

    let (result, failure) = match dispatcher.prepare_command() {
        Ok(command) => {
            let session = dispatcher.resolve_session();
            let tier = dispatcher.select_tier(session.as_ref()).await;
            let result = CheckResult {
                ready: true,
                instructions,
                command: Some(command),
                session: session.map(|s| s.to_string()),
                tier: Some(tier),
                follow_up,
                error: None,
            };
            (result, None)
        }
        Err(e) => {
            warn!(error = %e, "Instructions are not ready");
            let result = CheckResult {
                ready: false,
                instructions,
                command: None,
                session: None,
                tier: None,
                follow_up: None,
                error: Some(e.to_string()),
            };
            (result, Some(e))
        }
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&result).context("Failed to serialize check result")?;
        println!("{}", json);
    } else {
        print_check_result(&result);
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn print_check_result(result: &CheckResult) {
    println!("Instructions: {}", result.instructions);

    if let Some(ref error) = result.error {
        println!("Status:       not ready");
        println!("Reason:       {}", error);
        return;
    }

    println!("Status:       ready");
    if let Some(ref command) = result.command {
        println!("Command:      {}", command);
    }
    match result.session {
        Some(ref session) => println!("Session:      {}", session),
        None => println!("Session:      (none)"),
    }
    if let Some(tier) = result.tier {
        println!("Tier:         {}", tier);
    }
    match result.follow_up {
        Some(ref follow_up) => println!("Follow-up:    {}", follow_up),
        None => println!("Follow-up:    (disabled)"),
    }
}
