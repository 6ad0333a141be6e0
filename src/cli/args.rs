//! Command line arguments for fwcheck.
//!
//! Options can also come from the environment (`FWCHECK_*`); flags given on
//! the command line win.

use crate::data::settings::DEFAULT_SETTINGS_PATH;
use crate::FIREWALL_ENV_VAR;
use clap::{Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;

/// Command to execute
#[derive(Subcommand, Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// Run the firewall disable checks (default)
    #[default]
    Check,
    /// List all available checks
    List,
    /// Print version information
    Version,
}

/// Output format selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// JUnit XML for CI/CD integration
    Junit,
}

/// Parsed command line arguments
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fwcheck",
    version,
    about = "Validate that the agent firewall can be manually disabled"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Settings file written and removed by the run
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "FWCHECK_SETTINGS_PATH",
        default_value = DEFAULT_SETTINGS_PATH
    )]
    pub settings_path: PathBuf,

    /// Environment variable carrying the firewall toggle
    #[arg(
        long,
        global = true,
        value_name = "NAME",
        env = "FWCHECK_ENV_VAR",
        default_value = FIREWALL_ENV_VAR
    )]
    pub env_var: String,

    /// Output format
    #[arg(long, global = true, value_enum, env = "FWCHECK_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Run only this check (repeatable)
    #[arg(long, global = true, value_name = "ID")]
    pub only: Vec<String>,

    /// Skip this check (repeatable)
    #[arg(long, global = true, value_name = "ID")]
    pub skip: Vec<String>,

    /// Stop on first failure
    #[arg(long, global = true)]
    pub fail_fast: bool,

    /// Leave the settings file in place after the run
    #[arg(long, global = true)]
    pub keep_settings: bool,

    /// Only output failures
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Include timings and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log filter for stderr (e.g. "debug", "fwcheck=trace")
    #[arg(long, global = true, value_name = "LEVEL", env = "FWCHECK_LOG")]
    pub log_level: Option<String>,
}

impl Args {
    /// The command to run; no subcommand means `check`.
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    /// Color is on unless disabled by flag or NO_COLOR.
    ///
    /// Callers still need to check that stdout is a terminal.
    pub fn color_requested(&self) -> bool {
        !self.no_color && env::var_os("NO_COLOR").is_none()
    }
}
