//! Mock backends
//!
//! Recording stand-ins for the multiplexer, keystroke tool and notifier, for
//! tests without tmux or a desktop session. All mocks share one [`EventLog`]
//! so tests can assert the order in which tiers were tried.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use contracts::{ContractError, KeystrokeSimulator, Multiplexer, Notifier, SessionName};

/// One observable side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    /// Session existence was queried
    SessionQueried(String),
    /// Line sent into a multiplexer session
    MultiplexerLine { session: String, text: String },
    /// Text typed by the keystroke simulator
    Typed(String),
    /// Enter pressed by the keystroke simulator
    Enter,
    /// Notification shown
    Notified { title: String, message: String },
}

/// Shared, ordered record of mock events
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<MockEvent>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MockEvent>> {
        // poisoned only by a panicking test; the events are still valid
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, event: MockEvent) {
        self.lock().push(event);
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<MockEvent> {
        self.lock().clone()
    }

    /// Lines delivered through the multiplexer
    pub fn multiplexer_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MockEvent::MultiplexerLine { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Text typed by the keystroke simulator
    pub fn typed(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MockEvent::Typed(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Notification messages, in order
    pub fn notifications(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MockEvent::Notified { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Whether any keystroke-tier event happened
    pub fn used_keystrokes(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, MockEvent::Typed(_) | MockEvent::Enter))
    }
}

/// Mock multiplexer configuration
#[derive(Debug, Clone)]
pub struct MockMultiplexerConfig {
    /// Executable "found" on PATH
    pub available: bool,
    /// Existing session names
    pub sessions: Vec<String>,
    /// Number of `send_line` calls that succeed before every later one fails
    /// (None = never fail)
    pub fail_after: Option<usize>,
}

impl Default for MockMultiplexerConfig {
    fn default() -> Self {
        Self {
            available: true,
            sessions: Vec::new(),
            fail_after: None,
        }
    }
}

/// Recording multiplexer
pub struct MockMultiplexer {
    config: MockMultiplexerConfig,
    sent: usize,
    log: EventLog,
}

impl MockMultiplexer {
    pub fn new(config: MockMultiplexerConfig, log: EventLog) -> Self {
        Self {
            config,
            sent: 0,
            log,
        }
    }

    /// Available multiplexer with one existing session
    pub fn with_session(session: &str, log: EventLog) -> Self {
        Self::new(
            MockMultiplexerConfig {
                sessions: vec![session.to_string()],
                ..Default::default()
            },
            log,
        )
    }

    /// Multiplexer executable not installed
    pub fn unavailable(log: EventLog) -> Self {
        Self::new(
            MockMultiplexerConfig {
                available: false,
                ..Default::default()
            },
            log,
        )
    }
}

impl Multiplexer for MockMultiplexer {
    fn name(&self) -> &str {
        "mock-mux"
    }

    async fn is_available(&self) -> bool {
        self.config.available
    }

    async fn has_session(&self, session: &SessionName) -> bool {
        self.log.push(MockEvent::SessionQueried(session.to_string()));
        self.config.sessions.iter().any(|s| session == s.as_str())
    }

    async fn send_line(&mut self, session: &SessionName, text: &str) -> Result<(), ContractError> {
        if self.config.fail_after.is_some_and(|limit| self.sent >= limit) {
            return Err(ContractError::multiplexer("mock-mux", "send-keys failed"));
        }
        self.sent += 1;
        self.log.push(MockEvent::MultiplexerLine {
            session: session.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Hint carried by [`MockKeystrokes::failing`] errors
pub const MISSING_TOOL_HINT: &str = "no input tool on linux (install xdotool)";

/// Recording keystroke simulator
pub struct MockKeystrokes {
    fail: bool,
    log: EventLog,
}

impl MockKeystrokes {
    pub fn new(log: EventLog) -> Self {
        Self { fail: false, log }
    }

    /// Simulator whose tool is missing
    pub fn failing(log: EventLog) -> Self {
        Self { fail: true, log }
    }
}

impl KeystrokeSimulator for MockKeystrokes {
    fn name(&self) -> &str {
        "mock-keys"
    }

    async fn type_text(&mut self, text: &str, _interval: Duration) -> Result<(), ContractError> {
        if self.fail {
            return Err(ContractError::keystroke_unavailable(MISSING_TOOL_HINT));
        }
        self.log.push(MockEvent::Typed(text.to_string()));
        Ok(())
    }

    async fn press_enter(&mut self) -> Result<(), ContractError> {
        if self.fail {
            return Err(ContractError::keystroke_unavailable(MISSING_TOOL_HINT));
        }
        self.log.push(MockEvent::Enter);
        Ok(())
    }
}

/// Notifier that records instead of displaying
pub struct RecordingNotifier {
    log: EventLog,
}

impl RecordingNotifier {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, title: &str, message: &str) {
        self.log.push(MockEvent::Notified {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}
