//! fwcheck library
//!
//! Validation harness for manually disabling the agent firewall.
//!
//! The harness runs four checks in a fixed order:
//! - FW-001: the `COPILOT_AGENT_FIREWALL_ENABLED` environment variable is `false`
//! - FW-002: a settings snapshot disabling the firewall survives a write/read round trip
//! - FW-003: the aggregated status (environment OR settings file) reads as disabled
//! - FW-004: the manual override recorded in the settings file persists
//!
//! The settings file written by FW-002 is removed when the run finishes,
//! whether the checks passed or not. A file the run did not write is never
//! touched.
//!
//! # Example
//!
//! ```no_run
//! use fwcheck::engine::reporter::Reporter;
//! use fwcheck::platform::env::ProcessEnv;
//! use fwcheck::{run_harness, HarnessConfig};
//!
//! let run = run_harness(HarnessConfig::default(), &ProcessEnv, Reporter::silent());
//! println!("Checks passed: {}", run.report.summary().passed);
//! ```

pub mod checks;
pub mod cli;
pub mod data;
pub mod engine;
pub mod platform;
pub mod version;

use cli::args::Args;
use data::settings::DEFAULT_SETTINGS_PATH;
use engine::cleanup::{CleanupOutcome, SettingsGuard};
use engine::harness::Harness;
use engine::reporter::Reporter;
use platform::env::EnvSource;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// Re-exports for public API
pub use engine::result::{HarnessReport, ResultSummary};

/// Environment variable that toggles the firewall.
pub const FIREWALL_ENV_VAR: &str = "COPILOT_AGENT_FIREWALL_ENABLED";

/// Outcome of a single check, as logged by the reporter.
///
/// Once built, a result is only ever read: the reporter owns it until the
/// process exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Check identifier (e.g., "FW-001"), empty for ad-hoc results
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Human-readable name
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub duration_ms: u64,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        CheckResult {
            id: String::new(),
            name: name.into(),
            passed,
            message: message.into(),
            duration_ms: 0,
        }
    }

    /// Status tag without brackets.
    pub fn status(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status(), self.name, self.message)
    }
}

/// Error types for fwcheck operations.
#[derive(Debug, Error)]
pub enum FwCheckError {
    /// The environment variable exists but could not be read
    #[error("failed to read environment variable {name}: {message}")]
    EnvRead { name: String, message: String },

    #[error("settings file not found: {path}")]
    SettingsNotFound { path: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON or has the wrong shape
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Configuration for a harness run.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Settings file written, read, and finally removed by the run
    pub settings_path: PathBuf,
    /// Environment variable carrying the firewall toggle
    pub env_var: String,
    /// Specific checks to run (by ID)
    pub only_checks: Vec<String>,
    /// Specific checks to skip (by ID)
    pub skip_checks: Vec<String>,
    /// Stop on first failure
    pub fail_fast: bool,
    /// Leave the settings file in place after the run
    pub keep_settings: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            env_var: FIREWALL_ENV_VAR.to_string(),
            only_checks: Vec::new(),
            skip_checks: Vec::new(),
            fail_fast: false,
            keep_settings: false,
        }
    }
}

impl HarnessConfig {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Self {
        HarnessConfig {
            settings_path: args.settings_path.clone(),
            env_var: args.env_var.clone(),
            only_checks: args.only.clone(),
            skip_checks: args.skip.clone(),
            fail_fast: args.fail_fast,
            keep_settings: args.keep_settings,
        }
    }

    /// Whether the check with this ID is scheduled under `--only`/`--skip`.
    pub fn selects(&self, check_id: &str) -> bool {
        let listed = |ids: &[String]| ids.iter().any(|id| id.eq_ignore_ascii_case(check_id));
        (self.only_checks.is_empty() || listed(&self.only_checks)) && !listed(&self.skip_checks)
    }
}

/// A finished run: the report plus what happened to the settings file.
#[derive(Debug)]
pub struct HarnessRun {
    pub report: HarnessReport,
    pub cleanup: CleanupOutcome,
}

/// Run the harness and clean up the settings file.
///
/// This is the main entry point. The guard owns the settings file only once a
/// check has written it; a file that was already there and never rewritten
/// (e.g. under `--skip FW-002` or `--fail-fast`) is left alone.
pub fn run_harness(config: HarnessConfig, env: &dyn EnvSource, reporter: Reporter) -> HarnessRun {
    let mut guard = SettingsGuard::new(config.settings_path.clone(), config.keep_settings);
    let mut harness = Harness::new(config, env, reporter);
    guard.track(harness.written_flag());

    let report = harness.run_all();

    HarnessRun {
        report,
        cleanup: guard.release(),
    }
}
