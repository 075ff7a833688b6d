//! # Integration Tests
//!
//! Integration and end-to-end tests.
//!
//! Covers:
//! - Contract smoke tests
//! - Settings file -> dispatcher flows with mock backends
//! - The real tmux backend driven through a stand-in executable

#[cfg(test)]
mod contract_tests {
    use contracts::{DeliveryTier, DispatchSettings};

    #[test]
    fn test_contracts_compile() {
        let settings = DispatchSettings::default();
        assert_eq!(settings.command_prefix, "/compact");
        assert_eq!(DeliveryTier::Multiplexer.to_string(), "multiplexer");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs::{self, File};
    use std::path::Path;
    use std::time::{Duration, SystemTime};

    use config_loader::ConfigLoader;
    use contracts::{DeliveryTier, DispatchSettings};
    use dispatcher::mock::{
        EventLog, MockKeystrokes, MockMultiplexer, RecordingNotifier, MISSING_TOOL_HINT,
    };
    use dispatcher::{CompactDispatcher, DispatcherError};
    use tempfile::TempDir;

    /// Settings file pointing at `dir`, with zero delays
    fn write_settings(dir: &Path, extra: &str) -> DispatchSettings {
        let path = dir.join("smart-compact.toml");
        let content = format!(
            "instructions_path = '{}'\n\
             session_path = '{}'\n\
             {extra}\n\
             [timing]\n\
             settle_ms = 0\n\
             focus_ms = 0\n\
             key_interval_ms = 0\n\
             enter_delay_ms = 0\n",
            dir.join("instructions.txt").display(),
            dir.join("session.txt").display(),
        );
        fs::write(&path, content).unwrap();
        ConfigLoader::load_from_path(&path).unwrap()
    }

    fn age_file(path: &Path, secs: u64) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(secs))
            .unwrap();
    }

    /// End-to-end: settings file -> dispatcher -> multiplexer tier
    ///
    /// Verifies:
    /// 1. The instruction text is collapsed into one command line
    /// 2. The command and the follow-up go to the named session
    /// 3. Keystroke simulation is never touched
    /// 4. Both transient files are removed
    #[tokio::test]
    async fn test_e2e_multiplexer_delivery() {
        let dir = TempDir::new().unwrap();
        let settings = write_settings(dir.path(), "");
        fs::write(&settings.instructions_path, "Focus on\nthe auth module   please\n").unwrap();
        fs::write(&settings.session_path, "  dev-1  \n").unwrap();

        let log = EventLog::new();
        let mut dispatcher = CompactDispatcher::new(
            settings.clone(),
            MockMultiplexer::with_session("dev-1", log.clone()),
            MockKeystrokes::new(log.clone()),
            RecordingNotifier::new(log.clone()),
        );
        let report = dispatcher.run().await.unwrap();

        assert!(report.delivered());
        assert_eq!(report.tier, Some(DeliveryTier::Multiplexer));
        assert_eq!(
            log.multiplexer_lines(),
            vec!["/compact Focus on the auth module please", "continue"]
        );
        assert!(!log.used_keystrokes());
        assert!(!settings.instructions_path.exists());
        assert!(!settings.session_path.exists());
        assert_eq!(
            log.notifications(),
            vec!["Compact executed via mock-mux (background)"]
        );
    }

    /// A file written 700 s ago against the 600 s default is rejected untouched
    #[tokio::test]
    async fn test_e2e_stale_instructions_are_kept() {
        let dir = TempDir::new().unwrap();
        let settings = write_settings(dir.path(), "");
        fs::write(&settings.instructions_path, "Focus on auth").unwrap();
        fs::write(&settings.session_path, "dev-1").unwrap();
        age_file(&settings.instructions_path, 700);

        let log = EventLog::new();
        let mut dispatcher = CompactDispatcher::new(
            settings.clone(),
            MockMultiplexer::with_session("dev-1", log.clone()),
            MockKeystrokes::new(log.clone()),
            RecordingNotifier::new(log.clone()),
        );
        let err = dispatcher.run().await.unwrap_err();

        assert!(matches!(err, DispatcherError::InstructionsStale { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(log.multiplexer_lines().is_empty());
        assert!(!log.used_keystrokes());
        assert!(settings.instructions_path.exists());
        assert!(settings.session_path.exists());
        assert_eq!(
            log.notifications(),
            vec!["Instructions are stale (>10 min old). Run /smart-compact again."]
        );
    }

    /// A settings file can widen the threshold and drop the follow-up
    #[tokio::test]
    async fn test_e2e_settings_file_overrides() {
        let dir = TempDir::new().unwrap();
        let settings = write_settings(dir.path(), "max_age_secs = 1200\nfollow_up = \"\"");
        fs::write(&settings.instructions_path, "Keep the parser notes").unwrap();
        age_file(&settings.instructions_path, 700);

        let log = EventLog::new();
        let mut dispatcher = CompactDispatcher::new(
            settings.clone(),
            MockMultiplexer::unavailable(log.clone()),
            MockKeystrokes::new(log.clone()),
            RecordingNotifier::new(log.clone()),
        );
        let report = dispatcher.run().await.unwrap();

        assert_eq!(report.tier, Some(DeliveryTier::Keystrokes));
        assert!(!report.follow_up_sent);
        assert_eq!(log.typed(), vec!["/compact Keep the parser notes"]);
        assert!(!settings.instructions_path.exists());
    }

    /// Both tiers failing keeps the files for a retry
    #[tokio::test]
    async fn test_e2e_undelivered_keeps_files() {
        let dir = TempDir::new().unwrap();
        let settings = write_settings(dir.path(), "");
        fs::write(&settings.instructions_path, "Focus on auth").unwrap();

        let log = EventLog::new();
        let mut dispatcher = CompactDispatcher::new(
            settings.clone(),
            MockMultiplexer::unavailable(log.clone()),
            MockKeystrokes::failing(log.clone()),
            RecordingNotifier::new(log.clone()),
        );
        let report = dispatcher.run().await.unwrap();

        assert!(!report.delivered());
        assert!(!report.cleaned_up);
        assert_eq!(report.hint.as_deref(), Some(MISSING_TOOL_HINT));
        assert!(settings.instructions_path.exists());
        assert!(log.notifications()[1].contains("install xdotool"));
    }

    /// Real tmux backend against a shell script that records its arguments
    #[cfg(unix)]
    #[tokio::test]
    async fn test_e2e_tmux_backend_with_stand_in_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let calls = dir.path().join("calls.log");
        let fake = dir.path().join("fake-tmux");
        fs::write(
            &fake,
            format!(
                "#!/bin/sh\nfor a in \"$@\"; do printf '%s|' \"$a\" >> '{0}'; done\necho >> '{0}'\n",
                calls.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

        let settings = write_settings(
            dir.path(),
            &format!("[multiplexer]\nprogram = '{}'", fake.display()),
        );
        fs::write(&settings.instructions_path, "Focus   on\tauth").unwrap();
        fs::write(&settings.session_path, "work").unwrap();

        let log = EventLog::new();
        let mut dispatcher = CompactDispatcher::new(
            settings.clone(),
            dispatcher::TmuxMultiplexer::new(&settings.multiplexer),
            MockKeystrokes::new(log.clone()),
            RecordingNotifier::new(log.clone()),
        );
        let report = dispatcher.run().await.unwrap();

        assert_eq!(report.tier, Some(DeliveryTier::Multiplexer));
        let recorded = fs::read_to_string(&calls).unwrap();
        let lines: Vec<_> = recorded.lines().collect();
        assert_eq!(
            lines,
            vec![
                "has-session|-t|=work|",
                "send-keys|-t|=work:|-l|--|/compact Focus on auth|",
                "send-keys|-t|=work:|Enter|",
                "send-keys|-t|=work:|-l|--|continue|",
                "send-keys|-t|=work:|Enter|",
            ]
        );
        assert!(!log.used_keystrokes());
        assert!(!settings.session_path.exists());
    }
}
