//! Firewall override checks.
//!
//! - Environment: the toggle variable (FW-001)
//! - Settings: settings file round trip, aggregated status, override persistence (FW-002..FW-004)
//!
//! # Error handling
//!
//! Check bodies return `Result<Verdict, FwCheckError>`:
//! - A mismatch between what was read and what the policy expects is a
//!   failing `Verdict`, with a message naming the values seen
//! - An unreadable variable or an unreadable/malformed file is an `Err`
//!
//! The harness turns every `Err` into a failing result, so nothing raised
//! inside a check reaches the caller.

pub mod environment;
pub mod settings;

use crate::platform::env::EnvSource;
use std::cell::Cell;
use std::path::Path;

/// What a check concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Verdict {
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Verdict {
            passed: false,
            message: message.into(),
        }
    }
}

/// Inputs shared by every check in a run.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub settings_path: &'a Path,
    pub env_var: &'a str,
    pub env: &'a dyn EnvSource,
    /// Set once a check has written the settings file during this run
    pub settings_written: &'a Cell<bool>,
}
