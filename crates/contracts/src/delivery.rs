//! Delivery outcome types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which delivery path carried the command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTier {
    /// Literal keys sent into a multiplexer session (no focus needed)
    Multiplexer,
    /// Simulated keyboard input against the focused window
    Keystrokes,
}

impl fmt::Display for DeliveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multiplexer => f.write_str("multiplexer"),
            Self::Keystrokes => f.write_str("keystrokes"),
        }
    }
}

/// Summary of a dispatch run that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Full command line that was (or would have been) sent
    pub command: String,

    /// Tier that delivered the command (None = undelivered)
    pub tier: Option<DeliveryTier>,

    /// Follow-up command reached the terminal
    pub follow_up_sent: bool,

    /// Temporary files were removed
    pub cleaned_up: bool,

    /// How to make delivery possible, when the input tool is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl DispatchReport {
    pub fn delivered(&self) -> bool {
        self.tier.is_some()
    }
}
