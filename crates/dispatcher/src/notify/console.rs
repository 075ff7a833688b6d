//! ConsoleNotifier - prints notifications to standard output

use contracts::Notifier;

/// Fallback notifier used when nothing native is available
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Line printed for a notification
    pub fn format(title: &str, message: &str) -> String {
        format!("[{title}] {message}")
    }
}

impl Notifier for ConsoleNotifier {
    async fn notify(&self, title: &str, message: &str) {
        println!("{}", Self::format(title, message));
    }
}
