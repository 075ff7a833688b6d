//! CompactDispatcher - validate, deliver, clean up, notify

use std::time::Duration;

use contracts::{
    ContractError, DeliveryTier, DispatchReport, DispatchSettings, KeystrokeSimulator, Multiplexer,
    Notifier, SessionName,
};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::backends::{CommandKeystrokes, TmuxMultiplexer};
use crate::cleanup::remove_files;
use crate::error::DispatcherError;
use crate::instructions;
use crate::notify::SystemNotifier;
use crate::sanitize::build_command;
use crate::session;

/// Shown before typing starts, the user must keep the terminal focused
pub const KEYSTROKE_NOTICE: &str = "Using keyboard simulation - keep terminal focused";

/// Shown after a keystroke delivery
pub const KEYSTROKE_DONE: &str = "Compact command executed";

/// Shown when neither tier delivered the command
pub const UNDELIVERED_MESSAGE: &str =
    "Compact command could not be delivered. Instructions kept for retry.";

/// Undelivered notification, with the setup hint when the input tool is missing
pub fn undelivered_message(hint: Option<&str>) -> String {
    match hint {
        Some(hint) => format!(
            "Compact command could not be delivered ({hint}). Instructions kept for retry."
        ),
        None => UNDELIVERED_MESSAGE.to_string(),
    }
}

/// Dispatcher wired to the real tmux, keystroke tool and desktop notifier
pub type SystemDispatcher = CompactDispatcher<TmuxMultiplexer, CommandKeystrokes, SystemNotifier>;

/// Build a dispatcher with backends detected for the running platform
pub fn create_dispatcher(settings: DispatchSettings) -> SystemDispatcher {
    let multiplexer = TmuxMultiplexer::new(&settings.multiplexer);
    CompactDispatcher::new(
        settings,
        multiplexer,
        CommandKeystrokes::detect(),
        SystemNotifier::detect(),
    )
}

/// Delivers the instruction file as a command into a terminal
///
/// Tier 1 sends keys into a multiplexer session; tier 2 types into the
/// focused window. Only precondition failures abort a run.
pub struct CompactDispatcher<M, K, N> {
    settings: DispatchSettings,
    multiplexer: M,
    keystrokes: K,
    notifier: N,
}

impl<M, K, N> CompactDispatcher<M, K, N>
where
    M: Multiplexer,
    K: KeystrokeSimulator,
    N: Notifier,
{
    pub fn new(settings: DispatchSettings, multiplexer: M, keystrokes: K, notifier: N) -> Self {
        Self {
            settings,
            multiplexer,
            keystrokes,
            notifier,
        }
    }

    /// Run the whole flow
    ///
    /// # Errors
    /// Precondition failures only (missing, stale, empty or unreadable
    /// instructions). The user has already been notified and no file was touched.
    /// An undelivered command is reported through `DispatchReport::tier`.
    #[instrument(name = "dispatcher_run", skip(self))]
    pub async fn run(&mut self) -> Result<DispatchReport, DispatcherError> {
        info!("Starting auto-execution");

        let command = match self.prepare_command() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Precondition failed, leaving files in place");
                self.notify(&e.user_message()).await;
                return Err(e);
            }
        };

        let session = self.resolve_session();
        let mut report = self.deliver(&command, session.as_ref()).await;

        match report.tier {
            Some(tier) => {
                let removed = self.cleanup();
                report.cleaned_up = true;

                let message = match tier {
                    DeliveryTier::Multiplexer => format!(
                        "Compact executed via {} (background)",
                        self.multiplexer.name()
                    ),
                    DeliveryTier::Keystrokes => KEYSTROKE_DONE.to_string(),
                };
                self.notify(&message).await;

                info!(
                    tier = %tier,
                    follow_up_sent = report.follow_up_sent,
                    removed_files = removed,
                    "Complete"
                );
            }
            None => {
                error!("Command was not delivered, keeping files for retry");
                self.notify(&undelivered_message(report.hint.as_deref()))
                    .await;
            }
        }

        Ok(report)
    }

    /// Validate, load and sanitize: the command that would be sent
    pub fn prepare_command(&self) -> Result<String, DispatcherError> {
        let age = self.validate_instructions()?;
        let instructions = self.load_instructions()?;
        let command = build_command(&self.settings.command_prefix, &instructions);

        info!(
            age_secs = age.as_secs(),
            chars = command.chars().count(),
            "Instructions loaded"
        );
        Ok(command)
    }

    /// Instruction file exists and is not older than the threshold
    pub fn validate_instructions(&self) -> Result<Duration, DispatcherError> {
        instructions::validate_instructions(
            &self.settings.instructions_path,
            self.settings.max_age(),
        )
    }

    /// Trimmed, non-empty instruction text
    pub fn load_instructions(&self) -> Result<String, DispatcherError> {
        instructions::load_instructions(&self.settings.instructions_path)
    }

    /// Session named in the optional session file
    pub fn resolve_session(&self) -> Option<SessionName> {
        session::resolve_session(&self.settings.session_path)
    }

    /// Tier the command would take, without sending anything
    pub async fn select_tier(&self, session: Option<&SessionName>) -> DeliveryTier {
        if self.multiplexer_target(session).await.is_some() {
            DeliveryTier::Multiplexer
        } else {
            DeliveryTier::Keystrokes
        }
    }

    /// Deliver `command` (and the follow-up), multiplexer first
    ///
    /// Never fails; the report's `tier` is `None` when both tiers failed.
    #[instrument(name = "dispatcher_deliver", skip(self, command))]
    pub async fn deliver(
        &mut self,
        command: &str,
        session: Option<&SessionName>,
    ) -> DispatchReport {
        let mut report = DispatchReport {
            command: command.to_string(),
            tier: None,
            follow_up_sent: false,
            cleaned_up: false,
            hint: None,
        };

        if let Some(target) = self.multiplexer_target(session).await {
            info!(
                multiplexer = self.multiplexer.name(),
                session = %target,
                "Using multiplexer session"
            );
            match self.deliver_via_multiplexer(target, command).await {
                Ok(follow_up_sent) => {
                    report.tier = Some(DeliveryTier::Multiplexer);
                    report.follow_up_sent = follow_up_sent;
                    return report;
                }
                Err(e) => {
                    warn!(error = %e, "Multiplexer delivery failed, falling back to keystrokes");
                }
            }
        }

        info!(backend = self.keystrokes.name(), "Using keyboard simulation (focus required)");
        self.notify(KEYSTROKE_NOTICE).await;

        match self.deliver_via_keystrokes(command).await {
            Ok(follow_up_sent) => {
                report.tier = Some(DeliveryTier::Keystrokes);
                report.follow_up_sent = follow_up_sent;
            }
            Err(e) => {
                error!(error = %e, "Keystroke delivery failed");
                if let ContractError::KeystrokeUnavailable { message } = e {
                    report.hint = Some(message);
                }
            }
        }

        report
    }

    /// Remove the instruction and session files; errors are swallowed
    pub fn cleanup(&self) -> usize {
        remove_files(&[
            self.settings.instructions_path.as_path(),
            self.settings.session_path.as_path(),
        ])
    }

    /// Best-effort notification with the configured title
    pub async fn notify(&self, message: &str) {
        self.notifier
            .notify(&self.settings.notification_title, message)
            .await;
    }

    /// Session to use for tier 1, if every gate passes
    async fn multiplexer_target<'a>(
        &self,
        session: Option<&'a SessionName>,
    ) -> Option<&'a SessionName> {
        let Some(session) = session else {
            debug!("No session file, skipping multiplexer");
            return None;
        };
        if !self.settings.multiplexer.enabled {
            debug!("Multiplexer disabled by settings");
            return None;
        }
        if !self.multiplexer.is_available().await {
            info!(
                multiplexer = self.multiplexer.name(),
                "Multiplexer not found on PATH"
            );
            return None;
        }
        if !self.multiplexer.has_session(session).await {
            info!(session = %session, "Multiplexer session does not exist");
            return None;
        }
        Some(session)
    }

    /// Returns whether the follow-up was sent
    async fn deliver_via_multiplexer(
        &mut self,
        session: &SessionName,
        command: &str,
    ) -> Result<bool, ContractError> {
        self.multiplexer.send_line(session, command).await?;
        info!("Sent command via multiplexer");

        let Some(follow_up) = self.settings.follow_up().map(str::to_owned) else {
            return Ok(false);
        };

        sleep(self.settings.timing.settle()).await;

        match self.multiplexer.send_line(session, &follow_up).await {
            Ok(()) => {
                info!(follow_up = %follow_up, "Sent follow-up via multiplexer");
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Follow-up not sent");
                Ok(false)
            }
        }
    }

    /// Returns whether the follow-up was sent
    async fn deliver_via_keystrokes(&mut self, command: &str) -> Result<bool, ContractError> {
        self.type_line(command).await?;
        info!("Typed command");

        let Some(follow_up) = self.settings.follow_up().map(str::to_owned) else {
            return Ok(false);
        };

        sleep(self.settings.timing.settle()).await;

        match self.type_line(&follow_up).await {
            Ok(()) => {
                info!(follow_up = %follow_up, "Typed follow-up");
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Follow-up not typed");
                Ok(false)
            }
        }
    }

    /// Focus delay, typed text, short pause, Enter
    async fn type_line(&mut self, text: &str) -> Result<(), ContractError> {
        let timing = &self.settings.timing;
        sleep(timing.focus()).await;
        self.keystrokes.type_text(text, timing.key_interval()).await?;
        sleep(timing.enter_delay()).await;
        self.keystrokes.press_enter().await
    }
}
