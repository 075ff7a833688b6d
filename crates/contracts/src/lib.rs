//! # Contracts
//!
//! Shared interface contracts for the smart-compact workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Delivery Model
//! - A command is delivered through a terminal multiplexer when a named session is
//!   reachable, otherwise by simulated keystrokes against the focused window
//! - Notification and delivery backends are capabilities behind traits so they can be
//!   swapped at runtime or replaced by recording stubs in tests

mod delivery;
mod error;
mod keystroke;
mod multiplexer;
mod notifier;
mod session;
mod settings;

pub use delivery::*;
pub use error::*;
pub use keystroke::{KeystrokeSimulator, LocalKeystrokeSimulator};
pub use multiplexer::{LocalMultiplexer, Multiplexer};
pub use notifier::{LocalNotifier, Notifier};
pub use session::SessionName;
pub use settings::*;
