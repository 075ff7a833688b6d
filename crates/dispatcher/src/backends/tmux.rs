//! TmuxMultiplexer - delivers text with `tmux send-keys`

use std::path::Path;
use std::time::Duration;

use contracts::{ContractError, Multiplexer, MultiplexerSettings, SessionName};
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::platform::find_program;
use crate::process::{CommandFailure, run_with_deadline};

/// Multiplexer backed by the tmux CLI
pub struct TmuxMultiplexer {
    program: String,
    name: String,
    query_timeout: Duration,
    send_timeout: Duration,
}

impl TmuxMultiplexer {
    /// Create from multiplexer settings
    pub fn new(settings: &MultiplexerSettings) -> Self {
        Self {
            program: settings.program.clone(),
            name: display_name(&settings.program),
            query_timeout: settings.query_timeout(),
            send_timeout: settings.send_timeout(),
        }
    }

    /// `has-session -t =<session>`
    pub fn has_session_args(session: &SessionName) -> Vec<String> {
        vec![
            "has-session".to_string(),
            "-t".to_string(),
            session_target(session),
        ]
    }

    /// `send-keys -t =<session>: -l -- <text>`: text is sent verbatim, never parsed as key names
    pub fn literal_args(session: &SessionName, text: &str) -> Vec<String> {
        vec![
            "send-keys".to_string(),
            "-t".to_string(),
            pane_target(session),
            "-l".to_string(),
            "--".to_string(),
            text.to_string(),
        ]
    }

    /// `send-keys -t =<session>: Enter`
    pub fn enter_args(session: &SessionName) -> Vec<String> {
        vec![
            "send-keys".to_string(),
            "-t".to_string(),
            pane_target(session),
            "Enter".to_string(),
        ]
    }

    async fn run(&self, args: &[String], deadline: Duration) -> Result<(), ContractError> {
        let mut command = Command::new(&self.program);
        command.args(args);
        run_with_deadline(&mut command, deadline)
            .await
            .map(|_| ())
            .map_err(|failure| match failure {
                CommandFailure::TimedOut(waited) => ContractError::MultiplexerTimeout {
                    program: self.program.clone(),
                    waited,
                },
                other => ContractError::multiplexer(&self.program, other.to_string()),
            })
    }
}

/// Exact session match; a bare name would also match by prefix
fn session_target(session: &SessionName) -> String {
    format!("={session}")
}

/// Active pane of the exactly named session
fn pane_target(session: &SessionName) -> String {
    format!("={session}:")
}

/// Executable stem, so `/usr/local/bin/tmux` reads as `tmux`
fn display_name(program: &str) -> String {
    Path::new(program)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| program.to_string())
}

impl Multiplexer for TmuxMultiplexer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }

    #[instrument(name = "tmux_has_session", skip(self), fields(session = %session))]
    async fn has_session(&self, session: &SessionName) -> bool {
        match self
            .run(&Self::has_session_args(session), self.query_timeout)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Session not found");
                false
            }
        }
    }

    #[instrument(
        name = "tmux_send_line",
        skip(self, text),
        fields(session = %session, chars = text.chars().count())
    )]
    async fn send_line(&mut self, session: &SessionName, text: &str) -> Result<(), ContractError> {
        self.run(&Self::literal_args(session, text), self.send_timeout)
            .await?;
        self.run(&Self::enter_args(session), self.send_timeout)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionName {
        SessionName::parse("work").unwrap()
    }

    #[test]
    fn test_literal_args_keep_text_whole() {
        let args = TmuxMultiplexer::literal_args(&session(), "-n Enter C-c");
        assert_eq!(
            args,
            vec!["send-keys", "-t", "=work:", "-l", "--", "-n Enter C-c"]
        );
    }

    #[test]
    fn test_enter_and_query_args() {
        assert_eq!(
            TmuxMultiplexer::enter_args(&session()),
            vec!["send-keys", "-t", "=work:", "Enter"]
        );
        assert_eq!(
            TmuxMultiplexer::has_session_args(&session()),
            vec!["has-session", "-t", "=work"]
        );
    }

    #[test]
    fn test_name_is_program_stem() {
        let settings = MultiplexerSettings {
            program: "/usr/local/bin/tmux".to_string(),
            ..MultiplexerSettings::default()
        };
        assert_eq!(TmuxMultiplexer::new(&settings).name(), "tmux");
        assert_eq!(
            TmuxMultiplexer::new(&MultiplexerSettings::default()).name(),
            "tmux"
        );
    }

    #[tokio::test]
    async fn test_missing_program() {
        let settings = MultiplexerSettings {
            program: "/nonexistent/tmux".to_string(),
            ..MultiplexerSettings::default()
        };
        let mut mux = TmuxMultiplexer::new(&settings);

        assert!(!mux.is_available().await);
        assert!(!mux.has_session(&session()).await);

        let err = mux.send_line(&session(), "continue").await.unwrap_err();
        assert!(matches!(err, ContractError::Multiplexer { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_send_line_runs_literal_then_enter() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join("calls.log");
        let fake = dir.path().join("fake-tmux");
        std::fs::write(
            &fake,
            format!(
                "#!/bin/sh\nfor a in \"$@\"; do printf '%s|' \"$a\" >> '{}'; done\necho >> '{}'\n",
                log.display(),
                log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let settings = MultiplexerSettings {
            program: fake.to_string_lossy().into_owned(),
            ..MultiplexerSettings::default()
        };
        let mut mux = TmuxMultiplexer::new(&settings);
        assert!(mux.is_available().await);
        assert!(mux.has_session(&session()).await);

        mux.send_line(&session(), "/compact keep  it").await.unwrap();

        let calls = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<_> = calls.lines().collect();
        assert_eq!(
            lines,
            vec![
                "has-session|-t|=work|",
                "send-keys|-t|=work:|-l|--|/compact keep  it|",
                "send-keys|-t|=work:|Enter|",
            ]
        );
    }

    /// A tmux that only has "workshop": bare `work` would prefix-match it
    #[cfg(unix)]
    #[tokio::test]
    async fn test_has_session_does_not_prefix_match() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let fake = dir.path().join("fake-tmux");
        std::fs::write(
            &fake,
            "#!/bin/sh\ncase \"$3\" in\n  =workshop|workshop|work) exit 0 ;;\n  *) exit 1 ;;\nesac\n",
        )
        .unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let settings = MultiplexerSettings {
            program: fake.to_string_lossy().into_owned(),
            ..MultiplexerSettings::default()
        };
        let mux = TmuxMultiplexer::new(&settings);

        assert!(!mux.has_session(&session()).await);
        assert!(mux.has_session(&SessionName::parse("workshop").unwrap()).await);
    }
}
