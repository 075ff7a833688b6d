//! `info` command implementation.

use anyhow::Context;
use config_loader::ConfigLoader;
use contracts::DispatchSettings;
use dispatcher::backends::KeystrokeTool;
use dispatcher::platform::find_program;
use dispatcher::{Platform, SystemNotifier};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::Result;

/// Settings and backend availability for JSON output
#[derive(Serialize)]
struct SystemInfo {
    version: String,
    platform: String,
    settings: DispatchSettings,
    backends: BackendInfo,
}

#[derive(Serialize)]
struct BackendInfo {
    multiplexer: MultiplexerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    keystrokes: Option<String>,
    notifier: String,
}

#[derive(Serialize)]
struct MultiplexerInfo {
    enabled: bool,
    program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs, settings: DispatchSettings) -> Result<()> {
    let platform = Platform::detect();
    info!(platform = %platform, "Collecting settings and backend info");

    if args.json {
        let info = build_system_info(platform, settings);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize system info")?;
        println!("{}", json);
    } else {
        print_system_info(platform, &settings)?;
    }

    Ok(())
}

fn build_system_info(platform: Platform, settings: DispatchSettings) -> SystemInfo {
    let multiplexer = MultiplexerInfo {
        enabled: settings.multiplexer.enabled,
        program: settings.multiplexer.program.clone(),
        path: find_program(&settings.multiplexer.program).map(|p| p.display().to_string()),
    };

    SystemInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: platform.to_string(),
        backends: BackendInfo {
            multiplexer,
            keystrokes: KeystrokeTool::detect(platform).map(|t| t.label().to_string()),
            notifier: SystemNotifier::detect().kind().to_string(),
        },
        settings,
    }
}

fn print_system_info(platform: Platform, settings: &DispatchSettings) -> Result<()> {
    let mux = &settings.multiplexer;
    let mux_status = if !mux.enabled {
        "disabled".to_string()
    } else {
        match find_program(&mux.program) {
            Some(path) => format!("found at {}", path.display()),
            None => "not found".to_string(),
        }
    };
    let keystrokes = KeystrokeTool::detect(platform)
        .map(|t| t.label())
        .unwrap_or("not found");
    let notifier = SystemNotifier::detect().kind();

    println!("smart-compact {} ({})", env!("CARGO_PKG_VERSION"), platform);
    println!();
    println!("Backends");
    println!("   ├─ Multiplexer: {} ({})", mux.program, mux_status);
    println!("   ├─ Keystrokes:  {}", keystrokes);
    println!("   └─ Notifier:    {}", notifier);
    println!();
    println!("Settings");

    let toml = ConfigLoader::to_toml(settings).context("Failed to render settings")?;
    for line in toml.lines() {
        println!("   {}", line);
    }

    Ok(())
}
