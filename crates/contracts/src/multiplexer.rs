//! Multiplexer trait - control channel into a named terminal session

use crate::{ContractError, SessionName};

/// Terminal multiplexer control interface
///
/// Implementations deliver text into a session without needing window focus.
#[trait_variant::make(Multiplexer: Send)]
pub trait LocalMultiplexer {
    /// Backend name (used for logging/notifications)
    fn name(&self) -> &str;

    /// Whether the multiplexer executable can be found
    async fn is_available(&self) -> bool;

    /// Whether a session with this name currently exists
    ///
    /// Query failures count as "no such session".
    async fn has_session(&self, session: &SessionName) -> bool;

    /// Send `text` as literal keys followed by an Enter key-press
    ///
    /// # Errors
    /// Returns multiplexer error (should include context)
    async fn send_line(&mut self, session: &SessionName, text: &str) -> Result<(), ContractError>;
}
