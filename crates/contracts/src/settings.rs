//! DispatchSettings - paths, thresholds and timings for one dispatch run
//!
//! Every field has a default so a settings file only needs to list overrides.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Directory (under the home directory) where the producer writes its files
pub const STATE_DIR_NAME: &str = ".claude";

/// Default instruction file name
pub const INSTRUCTIONS_FILE_NAME: &str = "smart-compact-instructions.txt";

/// Default session file name
pub const SESSION_FILE_NAME: &str = "smart-compact-session.txt";

/// Complete dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Instruction text file
    pub instructions_path: PathBuf,

    /// Optional multiplexer session file
    pub session_path: PathBuf,

    /// Maximum instruction file age in seconds
    pub max_age_secs: u64,

    /// Prefix prepended to the sanitized instructions
    pub command_prefix: String,

    /// Follow-up command sent after the settle delay (empty = send only one command)
    pub follow_up: String,

    /// Title used for every desktop notification
    pub notification_title: String,

    /// Multiplexer tier
    pub multiplexer: MultiplexerSettings,

    /// Delays used by both tiers
    pub timing: TimingSettings,
}

impl DispatchSettings {
    /// Settings rooted at an explicit state directory instead of `~/.claude`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            instructions_path: dir.join(INSTRUCTIONS_FILE_NAME),
            session_path: dir.join(SESSION_FILE_NAME),
            ..Self::default()
        }
    }

    /// Staleness threshold as a Duration
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    /// Follow-up command, if one is configured
    pub fn follow_up(&self) -> Option<&str> {
        let trimmed = self.follow_up.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        let dir = default_state_dir();
        Self {
            instructions_path: dir.join(INSTRUCTIONS_FILE_NAME),
            session_path: dir.join(SESSION_FILE_NAME),
            max_age_secs: 600,
            command_prefix: "/compact".to_string(),
            follow_up: "continue".to_string(),
            notification_title: "Smart Compact".to_string(),
            multiplexer: MultiplexerSettings::default(),
            timing: TimingSettings::default(),
        }
    }
}

/// `~/.claude`, or `./.claude` when no home directory is known
pub fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STATE_DIR_NAME)
}

/// Terminal multiplexer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplexerSettings {
    /// Allow the multiplexer tier at all
    pub enabled: bool,
    /// Executable looked up on PATH
    pub program: String,
    /// Timeout for session queries in milliseconds
    pub query_timeout_ms: u64,
    /// Timeout for each key send in milliseconds
    pub send_timeout_ms: u64,
}

impl MultiplexerSettings {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

impl Default for MultiplexerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "tmux".to_string(),
            query_timeout_ms: 5_000,
            send_timeout_ms: 10_000,
        }
    }
}

/// Delays coordinating with the terminal process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Wait between the command and the follow-up
    pub settle_ms: u64,
    /// Keystroke tier: wait for the target window to gain focus
    pub focus_ms: u64,
    /// Keystroke tier: interval between characters
    pub key_interval_ms: u64,
    /// Keystroke tier: wait before pressing Enter
    pub enter_delay_ms: u64,
}

impl TimingSettings {
    /// All delays zero (tests)
    pub fn immediate() -> Self {
        Self {
            settle_ms: 0,
            focus_ms: 0,
            key_interval_ms: 0,
            enter_delay_ms: 0,
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn focus(&self) -> Duration {
        Duration::from_millis(self.focus_ms)
    }

    pub fn key_interval(&self) -> Duration {
        Duration::from_millis(self.key_interval_ms)
    }

    pub fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            settle_ms: 6_000,
            focus_ms: 300,
            key_interval_ms: 10,
            enter_delay_ms: 100,
        }
    }
}
