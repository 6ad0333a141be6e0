//! Check execution harness.
//!
//! Registers checks and runs them one at a time in registration order.
//!
//! # Graceful Degradation
//!
//! - Check errors: converted to a failing result prefixed with the check's error context
//! - Check panics: caught via std::panic::catch_unwind, converted to a failing result
//! - Invalid check ID in --only/--skip: silently ignored
//! - Empty selection: returns an empty report (not an error)
//!
//! Every scheduled check runs unless fail_fast is enabled.

use crate::checks::{environment, settings, CheckContext, Verdict};
use crate::engine::reporter::Reporter;
use crate::engine::result::HarnessReport;
use crate::platform::env::EnvSource;
use crate::{FwCheckError, HarnessConfig};
use chrono::Utc;
use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, warn};

/// Title printed above the live results
pub const SUITE_TITLE: &str = "Manual Firewall Disable Test Suite";

/// Body of a check
pub type CheckFn = Box<dyn Fn(&CheckContext<'_>) -> Result<Verdict, FwCheckError>>;

/// A registered check with its execution function
pub struct RegisteredCheck {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Prefix for the failure message when the body returns an error
    pub error_context: String,
    pub check_fn: CheckFn,
}

/// Runs registered checks against one settings path and environment.
pub struct Harness<'e> {
    config: HarnessConfig,
    env: &'e dyn EnvSource,
    reporter: Reporter,
    checks: Vec<RegisteredCheck>,
    settings_written: Rc<Cell<bool>>,
}

impl<'e> Harness<'e> {
    /// Create a harness with the standard FW-001..FW-004 checks registered
    pub fn new(config: HarnessConfig, env: &'e dyn EnvSource, reporter: Reporter) -> Self {
        let mut harness = Self::empty(config, env, reporter);
        harness.register_checks(create_all_checks());
        harness
    }

    /// Create a harness with no checks registered
    pub fn empty(config: HarnessConfig, env: &'e dyn EnvSource, reporter: Reporter) -> Self {
        Harness {
            config,
            env,
            reporter,
            checks: Vec::new(),
            settings_written: Rc::new(Cell::new(false)),
        }
    }

    pub fn register_checks(&mut self, checks: Vec<RegisteredCheck>) {
        for check in checks {
            self.register_check(check);
        }
    }

    pub fn register_check(&mut self, check: RegisteredCheck) {
        self.checks.push(check);
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Flag set once any run of this harness has written the settings file.
    ///
    /// Only a file written here is owned by the run and may be cleaned up.
    pub fn written_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.settings_written)
    }

    /// Run every selected check in order and build the report.
    ///
    /// The returned report holds only this run's results; the reporter log
    /// keeps accumulating across runs.
    pub fn run_all(&mut self) -> HarnessReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let first_new = self.reporter.results().len();

        let selected: Vec<&RegisteredCheck> = self
            .checks
            .iter()
            .filter(|c| self.config.selects(&c.id))
            .collect();

        let ctx = CheckContext {
            settings_path: &self.config.settings_path,
            env_var: &self.config.env_var,
            env: self.env,
            settings_written: &self.settings_written,
        };

        self.reporter.begin_suite(SUITE_TITLE);

        for check in &selected {
            let (passed, message, duration_ms) = execute_check(check, &ctx);
            let logged = self.reporter.log_result(&check.name, passed, &message);
            logged.id = check.id.clone();
            logged.duration_ms = duration_ms;

            if self.config.fail_fast && !passed {
                debug!(check = %check.id, "fail-fast: stopping after first failure");
                break;
            }
        }

        HarnessReport {
            title: SUITE_TITLE.to_string(),
            started_at,
            settings_path: self.config.settings_path.display().to_string(),
            results: self.reporter.results()[first_new..].to_vec(),
            scheduled: selected.len() as u32,
            total_duration_ms: elapsed_ms(start),
        }
    }
}

/// Execute a single check, never letting an error or panic escape.
///
/// Returns `(passed, message, duration_ms)`.
fn execute_check(check: &RegisteredCheck, ctx: &CheckContext<'_>) -> (bool, String, u64) {
    let start = Instant::now();
    debug!(check = %check.id, name = %check.name, "running check");

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (check.check_fn)(ctx)));
    let duration_ms = elapsed_ms(start);

    let (passed, message) = match outcome {
        Ok(Ok(verdict)) => (verdict.passed, verdict.message),
        Ok(Err(e)) => {
            debug!(check = %check.id, error = %e, "check returned an error");
            (false, format!("{}: {}", check.error_context, e))
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            warn!(check = %check.id, %reason, "check panicked");
            (
                false,
                format!("{}: check panicked: {}", check.error_context, reason),
            )
        }
    };

    debug!(check = %check.id, passed, duration_ms, "check finished");
    (passed, message, duration_ms)
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Create the standard checks in canonical order
pub fn create_all_checks() -> Vec<RegisteredCheck> {
    vec![
        RegisteredCheck {
            id: "FW-001".to_string(),
            name: "Environment Variable Test".to_string(),
            description: "Firewall toggle variable is set to false".to_string(),
            error_context: "Error checking environment variable".to_string(),
            check_fn: Box::new(environment::check_env_disable),
        },
        RegisteredCheck {
            id: "FW-002".to_string(),
            name: "Settings File Test".to_string(),
            description: "Manual disable snapshot survives a settings file round trip".to_string(),
            error_context: "Error with settings file".to_string(),
            check_fn: Box::new(settings::check_settings_round_trip),
        },
        RegisteredCheck {
            id: "FW-003".to_string(),
            name: "Firewall Status Check".to_string(),
            description: "Environment or settings file reports the firewall as disabled".to_string(),
            error_context: "Error checking firewall status".to_string(),
            check_fn: Box::new(settings::check_firewall_status),
        },
        RegisteredCheck {
            id: "FW-004".to_string(),
            name: "Manual Disable Persistence".to_string(),
            description: "Settings file keeps the user's manual override".to_string(),
            error_context: "Error checking persistence".to_string(),
            check_fn: Box::new(settings::check_manual_disable_persistence),
        },
    ]
}
