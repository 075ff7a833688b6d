//! Notifier implementations
//!
//! Contains ConsoleNotifier, CommandNotifier, and the runtime-selected SystemNotifier.

mod command;
mod console;

pub use self::command::{CommandNotifier, NotifyTool};
pub use self::console::ConsoleNotifier;

use contracts::Notifier;
use tracing::info;

use crate::platform::Platform;

/// Notifier chosen by runtime platform detection
pub enum SystemNotifier {
    /// Native notification command
    Command(CommandNotifier),
    /// Standard output only
    Console(ConsoleNotifier),
}

impl SystemNotifier {
    /// Use the platform's notification command when it is installed
    pub fn detect() -> Self {
        let platform = Platform::detect();
        match NotifyTool::detect(platform) {
            Some(tool) => {
                info!(platform = %platform, tool = tool.label(), "Using native notifications");
                Self::Command(CommandNotifier::new(tool))
            }
            None => {
                info!(platform = %platform, "No notification tool, printing to console");
                Self::Console(ConsoleNotifier)
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Command(notifier) => notifier.tool().label(),
            Self::Console(_) => "console",
        }
    }
}

impl Notifier for SystemNotifier {
    async fn notify(&self, title: &str, message: &str) {
        match self {
            Self::Command(notifier) => notifier.notify(title, message).await,
            Self::Console(notifier) => notifier.notify(title, message).await,
        }
    }
}
