//! Settings validation module
//!
//! Rules:
//! - max_age_secs > 0
//! - instruction and session paths non-empty and distinct
//! - multiplexer program named and timeouts > 0 when the tier is enabled
//! - command_prefix non-empty
//! - key interval and settle delay within sane bounds

use contracts::{ContractError, DispatchSettings};

/// Upper bound for the inter-key interval
const MAX_KEY_INTERVAL_MS: u64 = 1_000;

/// Upper bound for the settle delay
const MAX_SETTLE_MS: u64 = 600_000;

/// Validate DispatchSettings
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(settings: &DispatchSettings) -> Result<(), ContractError> {
    validate_threshold(settings)?;
    validate_paths(settings)?;
    validate_command(settings)?;
    validate_multiplexer(settings)?;
    validate_timing(settings)?;
    Ok(())
}

fn validate_threshold(settings: &DispatchSettings) -> Result<(), ContractError> {
    if settings.max_age_secs == 0 {
        return Err(ContractError::config_validation(
            "max_age_secs",
            "max_age_secs must be > 0",
        ));
    }
    Ok(())
}

fn validate_paths(settings: &DispatchSettings) -> Result<(), ContractError> {
    if settings.instructions_path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "instructions_path",
            "instructions_path cannot be empty",
        ));
    }
    if settings.session_path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "session_path",
            "session_path cannot be empty",
        ));
    }
    if settings.instructions_path == settings.session_path {
        return Err(ContractError::config_validation(
            "instructions_path / session_path",
            format!(
                "instructions and session files must differ, both are '{}'",
                settings.instructions_path.display()
            ),
        ));
    }
    Ok(())
}

fn validate_command(settings: &DispatchSettings) -> Result<(), ContractError> {
    if settings.command_prefix.trim().is_empty() {
        return Err(ContractError::config_validation(
            "command_prefix",
            "command_prefix cannot be empty",
        ));
    }
    Ok(())
}

/// Only checked when the tier is enabled; a disabled tier may carry anything
fn validate_multiplexer(settings: &DispatchSettings) -> Result<(), ContractError> {
    let mux = &settings.multiplexer;
    if !mux.enabled {
        return Ok(());
    }

    if mux.program.trim().is_empty() {
        return Err(ContractError::config_validation(
            "multiplexer.program",
            "multiplexer program cannot be empty",
        ));
    }
    if mux.query_timeout_ms == 0 {
        return Err(ContractError::config_validation(
            "multiplexer.query_timeout_ms",
            "query_timeout_ms must be > 0",
        ));
    }
    if mux.send_timeout_ms == 0 {
        return Err(ContractError::config_validation(
            "multiplexer.send_timeout_ms",
            "send_timeout_ms must be > 0",
        ));
    }
    Ok(())
}

fn validate_timing(settings: &DispatchSettings) -> Result<(), ContractError> {
    let timing = &settings.timing;
    if timing.key_interval_ms > MAX_KEY_INTERVAL_MS {
        return Err(ContractError::config_validation(
            "timing.key_interval_ms",
            format!(
                "key_interval_ms ({}) must be <= {}",
                timing.key_interval_ms, MAX_KEY_INTERVAL_MS
            ),
        ));
    }
    if timing.settle_ms > MAX_SETTLE_MS {
        return Err(ContractError::config_validation(
            "timing.settle_ms",
            format!(
                "settle_ms ({}) must be <= {}",
                timing.settle_ms, MAX_SETTLE_MS
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn assert_field_error(settings: &DispatchSettings, expected_field: &str) {
        match validate(settings) {
            Err(ContractError::ConfigValidation { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("expected validation error on {expected_field}, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&DispatchSettings::default()).is_ok());
    }

    #[test]
    fn test_zero_threshold() {
        let settings = DispatchSettings {
            max_age_secs: 0,
            ..DispatchSettings::default()
        };
        assert_field_error(&settings, "max_age_secs");
    }

    #[test]
    fn test_same_paths() {
        let settings = DispatchSettings {
            instructions_path: PathBuf::from("/tmp/x.txt"),
            session_path: PathBuf::from("/tmp/x.txt"),
            ..DispatchSettings::default()
        };
        assert_field_error(&settings, "instructions_path / session_path");
    }

    #[test]
    fn test_empty_path() {
        let settings = DispatchSettings {
            session_path: PathBuf::new(),
            ..DispatchSettings::default()
        };
        assert_field_error(&settings, "session_path");
    }

    #[test]
    fn test_blank_prefix() {
        let settings = DispatchSettings {
            command_prefix: " ".to_string(),
            ..DispatchSettings::default()
        };
        assert_field_error(&settings, "command_prefix");
    }

    #[test]
    fn test_multiplexer_checked_only_when_enabled() {
        let mut settings = DispatchSettings::default();
        settings.multiplexer.program = String::new();
        assert_field_error(&settings, "multiplexer.program");

        settings.multiplexer.enabled = false;
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_zero_timeout() {
        let mut settings = DispatchSettings::default();
        settings.multiplexer.send_timeout_ms = 0;
        assert_field_error(&settings, "multiplexer.send_timeout_ms");
    }

    #[test]
    fn test_key_interval_bound() {
        let mut settings = DispatchSettings::default();
        settings.timing.key_interval_ms = 5_000;
        assert_field_error(&settings, "timing.key_interval_ms");
    }
}
