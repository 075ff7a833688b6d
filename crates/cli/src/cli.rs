//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Smart Compact - deliver generated compact instructions into a terminal
#[derive(Parser, Debug)]
#[command(
    name = "smart-compact",
    author,
    version,
    about = "Deliver generated /compact instructions into a terminal session",
    long_about = "Reads the instruction file written by /smart-compact, sends it as a /compact \n\
                  command into the tmux session named in the session file (or types it into \n\
                  the focused window when tmux is unavailable), follows up with 'continue', \n\
                  then removes the temporary files. Running without a subcommand is `run`."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SMART_COMPACT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "SMART_COMPACT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deliver the instructions (default)
    Run,

    /// Validate the instruction file and show what would be sent, without sending it
    Check(CheckArgs),

    /// Display effective settings and available backends
    Info(InfoArgs),
}

/// Settings file and per-field overrides, shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Settings file (TOML or JSON)
    #[arg(long, global = true, env = "SMART_COMPACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the instruction file path
    #[arg(long, global = true, env = "SMART_COMPACT_INSTRUCTIONS")]
    pub instructions: Option<PathBuf>,

    /// Override the session file path
    #[arg(long, global = true, env = "SMART_COMPACT_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Override the staleness threshold in seconds
    #[arg(long, global = true, env = "SMART_COMPACT_MAX_AGE")]
    pub max_age: Option<u64>,

    /// Send only the compact command, no follow-up
    #[arg(long, global = true)]
    pub no_follow_up: bool,

    /// Never use the multiplexer tier
    #[arg(long, global = true)]
    pub no_multiplexer: bool,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output check result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
