//! KeystrokeSimulator trait - emulated keyboard input against the focused window

use std::time::Duration;

use crate::ContractError;

/// Input-simulation interface
#[trait_variant::make(KeystrokeSimulator: Send)]
pub trait LocalKeystrokeSimulator {
    /// Backend name (used for logging)
    fn name(&self) -> &str;

    /// Type `text` character by character, pausing `interval` between keys
    async fn type_text(&mut self, text: &str, interval: Duration) -> Result<(), ContractError>;

    /// Press the Enter key once
    async fn press_enter(&mut self) -> Result<(), ContractError>;
}
