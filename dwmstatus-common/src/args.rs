//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the status daemon.
#[derive(Parser, Debug, Clone, Default)]
#[command(about = "Status line generator for the dwm status bar", version)]
pub struct StatusArgs {
    /// Path to configuration file (JSON5).
    ///
    /// Defaults to `$XDG_CONFIG_HOME/dwmstatus/config.json5` when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run a single cycle, print the status line and exit.
    #[arg(long)]
    pub once: bool,
}

impl StatusArgs {
    /// Parse CLI arguments from the process environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
