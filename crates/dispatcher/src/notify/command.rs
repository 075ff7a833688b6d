//! CommandNotifier - native desktop notifications via platform commands

use std::path::PathBuf;
use std::time::Duration;

use contracts::Notifier;
use tokio::process::Command;
use tracing::warn;

use super::ConsoleNotifier;
use crate::platform::{Platform, find_program};
use crate::process::run_with_deadline;

/// Notification commands are killed after this long
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

const APPLESCRIPT_NOTIFY: &str = r#"on run argv
    display notification (item 2 of argv) with title (item 1 of argv)
end run"#;

const POWERSHELL_NOTIFY: &str = r#"Add-Type -AssemblyName System.Windows.Forms
Add-Type -AssemblyName System.Drawing
$balloon = New-Object System.Windows.Forms.NotifyIcon
$balloon.Icon = [System.Drawing.SystemIcons]::Information
$balloon.BalloonTipTitle = $env:SMART_COMPACT_TITLE
$balloon.BalloonTipText = $env:SMART_COMPACT_MESSAGE
$balloon.Visible = $true
$balloon.ShowBalloonTip(3000)
Start-Sleep -Seconds 3
$balloon.Dispose()"#;

/// Native notification tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyTool {
    /// `notify-send` (freedesktop)
    NotifySend(PathBuf),
    /// `osascript -e 'display notification ...'`
    AppleScript(PathBuf),
    /// PowerShell balloon tip
    PowerShell(PathBuf),
}

impl NotifyTool {
    /// Find the tool for `platform` on the search path
    pub fn detect(platform: Platform) -> Option<Self> {
        match platform {
            Platform::Linux => find_program("notify-send").map(Self::NotifySend),
            Platform::MacOs => find_program("osascript").map(Self::AppleScript),
            Platform::Windows => find_program("powershell")
                .or_else(|| find_program("pwsh"))
                .map(Self::PowerShell),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotifySend(_) => "notify-send",
            Self::AppleScript(_) => "osascript",
            Self::PowerShell(_) => "powershell",
        }
    }

    /// Build the command; title and message are never interpolated into script source
    pub fn command(&self, title: &str, message: &str) -> Command {
        match self {
            Self::NotifySend(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["--", title, message]);
                cmd
            }
            Self::AppleScript(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["-e", APPLESCRIPT_NOTIFY, title, message]);
                cmd
            }
            Self::PowerShell(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["-NoProfile", "-NonInteractive", "-Command", POWERSHELL_NOTIFY])
                    .env("SMART_COMPACT_TITLE", title)
                    .env("SMART_COMPACT_MESSAGE", message);
                cmd
            }
        }
    }
}

/// Notifier that runs a native command, printing to the console if it fails
pub struct CommandNotifier {
    tool: NotifyTool,
}

impl CommandNotifier {
    pub fn new(tool: NotifyTool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &NotifyTool {
        &self.tool
    }
}

impl Notifier for CommandNotifier {
    async fn notify(&self, title: &str, message: &str) {
        let mut command = self.tool.command(title, message);
        if let Err(e) = run_with_deadline(&mut command, NOTIFY_TIMEOUT).await {
            warn!(tool = self.tool.label(), error = %e, "Notification command failed");
            ConsoleNotifier.notify(title, message).await;
        }
    }
}
