//! # Dispatcher
//!
//! Compact command dispatch module.
//!
//! Responsible for:
//! - Validating and loading the instruction file
//! - Sanitizing instructions into a one-line command
//! - Delivering it through a multiplexer session, falling back to simulated keystrokes
//! - Cleaning up the transient files and notifying the user

pub mod backends;
pub mod cleanup;
pub mod dispatcher;
pub mod error;
pub mod instructions;
pub mod mock;
pub mod notify;
pub mod platform;
pub mod process;
pub mod sanitize;
pub mod session;

pub use backends::{CommandKeystrokes, TmuxMultiplexer};
pub use contracts::{DeliveryTier, DispatchReport, DispatchSettings, SessionName};
pub use dispatcher::{CompactDispatcher, SystemDispatcher, create_dispatcher};
pub use error::DispatcherError;
pub use notify::{CommandNotifier, ConsoleNotifier, SystemNotifier};
pub use platform::Platform;
pub use sanitize::{build_command, sanitize};
