//! Settings resolution: defaults, then settings file, then command-line overrides.

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::DispatchSettings;
use tracing::info;

use crate::cli::SettingsArgs;

/// Build the effective settings for this invocation
pub fn resolve_settings(args: &SettingsArgs) -> Result<DispatchSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading settings file");
            ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?
        }
        None => DispatchSettings::default(),
    };

    apply_overrides(&mut settings, args);

    config_loader::validate(&settings).context("Invalid settings after command-line overrides")?;
    Ok(settings)
}

fn apply_overrides(settings: &mut DispatchSettings, args: &SettingsArgs) {
    if let Some(ref path) = args.instructions {
        info!(path = %path.display(), "Overriding instructions path from CLI");
        settings.instructions_path = path.clone();
    }
    if let Some(ref path) = args.session_file {
        info!(path = %path.display(), "Overriding session path from CLI");
        settings.session_path = path.clone();
    }
    if let Some(max_age) = args.max_age {
        info!(max_age_secs = max_age, "Overriding staleness threshold from CLI");
        settings.max_age_secs = max_age;
    }
    if args.no_follow_up {
        settings.follow_up.clear();
    }
    if args.no_multiplexer {
        settings.multiplexer.enabled = false;
    }
}
