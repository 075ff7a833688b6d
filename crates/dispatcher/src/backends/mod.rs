//! Delivery backends
//!
//! Contains the tmux control channel and the native keystroke tools.

mod keystrokes;
mod tmux;

pub use self::keystrokes::{CommandKeystrokes, KeystrokeTool};
pub use self::tmux::TmuxMultiplexer;
