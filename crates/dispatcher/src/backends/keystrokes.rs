//! CommandKeystrokes - simulated typing through the platform's native input tool
//!
//! - Linux: `xdotool type` / `xdotool key Return`
//! - macOS: `osascript` driving System Events
//! - Windows: PowerShell `SendKeys`

use std::path::PathBuf;
use std::time::Duration;

use contracts::{ContractError, KeystrokeSimulator};
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::platform::{Platform, find_program};
use crate::process::run_with_deadline;

/// Extra time allowed on top of the expected typing duration
const TOOL_GRACE: Duration = Duration::from_secs(10);

const APPLESCRIPT_TYPE: &str = r#"on run argv
    set theText to item 1 of argv
    set theDelay to (item 2 of argv as integer) / 1000
    tell application "System Events"
        repeat with ch in characters of theText
            keystroke ch
            delay theDelay
        end repeat
    end tell
end run"#;

const APPLESCRIPT_ENTER: &str = r#"tell application "System Events" to key code 36"#;

const POWERSHELL_TYPE: &str = r#"Add-Type -AssemblyName System.Windows.Forms
$text = $env:SMART_COMPACT_TEXT
$delay = [int]$env:SMART_COMPACT_DELAY_MS
foreach ($ch in $text.ToCharArray()) {
    $key = [string]$ch
    if ('+^%~(){}[]'.Contains($key)) { $key = '{' + $key + '}' }
    [System.Windows.Forms.SendKeys]::SendWait($key)
    Start-Sleep -Milliseconds $delay
}"#;

const POWERSHELL_ENTER: &str = r#"Add-Type -AssemblyName System.Windows.Forms
[System.Windows.Forms.SendKeys]::SendWait('{ENTER}')"#;

/// Native input-simulation tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeystrokeTool {
    Xdotool(PathBuf),
    AppleScript(PathBuf),
    PowerShell(PathBuf),
}

impl KeystrokeTool {
    /// Find the tool for `platform` on the search path
    pub fn detect(platform: Platform) -> Option<Self> {
        match platform {
            Platform::Linux => find_program("xdotool").map(Self::Xdotool),
            Platform::MacOs => find_program("osascript").map(Self::AppleScript),
            Platform::Windows => find_program("powershell")
                .or_else(|| find_program("pwsh"))
                .map(Self::PowerShell),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Xdotool(_) => "xdotool",
            Self::AppleScript(_) => "osascript",
            Self::PowerShell(_) => "powershell",
        }
    }

    /// Command that types `text` with `interval` between keys
    pub fn type_command(&self, text: &str, interval: Duration) -> Command {
        let interval_ms = interval.as_millis().to_string();
        match self {
            Self::Xdotool(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["type", "--delay", &interval_ms, "--", text]);
                cmd
            }
            Self::AppleScript(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["-e", APPLESCRIPT_TYPE, text, &interval_ms]);
                cmd
            }
            Self::PowerShell(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["-NoProfile", "-NonInteractive", "-Command", POWERSHELL_TYPE])
                    .env("SMART_COMPACT_TEXT", text)
                    .env("SMART_COMPACT_DELAY_MS", &interval_ms);
                cmd
            }
        }
    }

    /// Command that presses Enter once
    pub fn enter_command(&self) -> Command {
        match self {
            Self::Xdotool(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["key", "Return"]);
                cmd
            }
            Self::AppleScript(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["-e", APPLESCRIPT_ENTER]);
                cmd
            }
            Self::PowerShell(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["-NoProfile", "-NonInteractive", "-Command", POWERSHELL_ENTER]);
                cmd
            }
        }
    }
}

/// Keystroke simulator that shells out to the native tool
pub struct CommandKeystrokes {
    platform: Platform,
    tool: Option<KeystrokeTool>,
}

impl CommandKeystrokes {
    /// Detect the tool for the running platform
    pub fn detect() -> Self {
        let platform = Platform::detect();
        Self::with_tool(platform, KeystrokeTool::detect(platform))
    }

    pub fn with_tool(platform: Platform, tool: Option<KeystrokeTool>) -> Self {
        Self { platform, tool }
    }

    fn require_tool(&self) -> Result<&KeystrokeTool, ContractError> {
        self.tool.as_ref().ok_or_else(|| {
            let hint = match self.platform {
                Platform::Linux => "install xdotool",
                Platform::MacOs => "osascript not found",
                Platform::Windows => "powershell not found",
            };
            ContractError::keystroke_unavailable(format!(
                "no input tool on {} ({hint})",
                self.platform
            ))
        })
    }

    async fn run(
        tool: &KeystrokeTool,
        mut command: Command,
        deadline: Duration,
    ) -> Result<(), ContractError> {
        run_with_deadline(&mut command, deadline)
            .await
            .map(|_| ())
            .map_err(|e| ContractError::keystroke(tool.label(), e.to_string()))
    }
}

impl KeystrokeSimulator for CommandKeystrokes {
    fn name(&self) -> &str {
        self.tool.as_ref().map_or("none", KeystrokeTool::label)
    }

    #[instrument(
        name = "keystrokes_type_text",
        skip(self, text),
        fields(chars = text.chars().count(), interval_ms = interval.as_millis() as u64)
    )]
    async fn type_text(&mut self, text: &str, interval: Duration) -> Result<(), ContractError> {
        let tool = self.require_tool()?;
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let deadline = interval.saturating_mul(chars).saturating_add(TOOL_GRACE);
        debug!(tool = tool.label(), deadline_ms = deadline.as_millis() as u64, "Typing text");
        Self::run(tool, tool.type_command(text, interval), deadline).await
    }

    #[instrument(name = "keystrokes_press_enter", skip(self))]
    async fn press_enter(&mut self) -> Result<(), ContractError> {
        let tool = self.require_tool()?;
        Self::run(tool, tool.enter_command(), TOOL_GRACE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_xdotool_commands() {
        let tool = KeystrokeTool::Xdotool(PathBuf::from("/usr/bin/xdotool"));
        let typed = tool.type_command("-v /compact x", Duration::from_millis(10));
        assert_eq!(
            args_of(&typed),
            vec!["type", "--delay", "10", "--", "-v /compact x"]
        );
        assert_eq!(args_of(&tool.enter_command()), vec!["key", "Return"]);
    }

    #[test]
    fn test_applescript_passes_text_as_argument() {
        let tool = KeystrokeTool::AppleScript(PathBuf::from("/usr/bin/osascript"));
        let typed = tool.type_command("say \"hi\"", Duration::from_millis(25));
        let args = args_of(&typed);
        assert_eq!(args[0], "-e");
        assert_eq!(args[2], "say \"hi\"");
        assert_eq!(args[3], "25");
    }

    #[test]
    fn test_powershell_uses_environment() {
        let tool = KeystrokeTool::PowerShell(PathBuf::from("powershell.exe"));
        let typed = tool.type_command("a+b", Duration::from_millis(10));
        let envs: Vec<_> = typed
            .as_std()
            .get_envs()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.map(|v| v.to_string_lossy().into_owned()),
                )
            })
            .collect();
        assert!(envs.contains(&("SMART_COMPACT_TEXT".to_string(), Some("a+b".to_string()))));
        assert!(envs.contains(&("SMART_COMPACT_DELAY_MS".to_string(), Some("10".to_string()))));
    }

    #[tokio::test]
    async fn test_without_tool_is_unavailable() {
        let mut keys = CommandKeystrokes::with_tool(Platform::Linux, None);
        assert_eq!(keys.name(), "none");

        let err = keys
            .type_text("continue", Duration::from_millis(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::KeystrokeUnavailable { .. }));
        assert!(err.to_string().contains("xdotool"));

        let err = keys.press_enter().await.unwrap_err();
        assert!(matches!(err, ContractError::KeystrokeUnavailable { .. }));
    }
}
